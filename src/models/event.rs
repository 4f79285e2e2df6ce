use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The slice of a GitHub events API record the story needs.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type", default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Push,
    PullRequest,
    Issue,
    Review,
    Other,
}

impl EventKind {
    pub fn from_api_type(event_type: &str) -> Self {
        match event_type {
            "PushEvent" => EventKind::Push,
            "PullRequestEvent" => EventKind::PullRequest,
            "IssuesEvent" => EventKind::Issue,
            "PullRequestReviewEvent" => EventKind::Review,
            _ => EventKind::Other,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventKind::Push => write!(f, "Push"),
            EventKind::PullRequest => write!(f, "PullRequest"),
            EventKind::Issue => write!(f, "Issue"),
            EventKind::Review => write!(f, "Review"),
            EventKind::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub kind: EventKind,
    pub timestamp: DateTime<Utc>,
}
