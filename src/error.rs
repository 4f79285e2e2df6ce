use thiserror::Error;

use crate::models::SourceKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("{kind} source unavailable: {reason}")]
    SourceUnavailable { kind: SourceKind, reason: String },

    #[error("Malformed {kind} record: {reason}")]
    SourceMalformed { kind: SourceKind, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RateLimited(_) | Error::Network(_))
    }

    pub fn malformed(kind: SourceKind, reason: impl Into<String>) -> Self {
        Error::SourceMalformed {
            kind,
            reason: reason.into(),
        }
    }

    pub fn unavailable(kind: SourceKind, reason: impl Into<String>) -> Self {
        Error::SourceUnavailable {
            kind,
            reason: reason.into(),
        }
    }
}
