use chrono::{FixedOffset, Offset, Utc};
use std::env;

use crate::error::{Error, Result};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_CONTRIBUTIONS_API_URL: &str = "https://github-contributions-api.jogruber.de/v4";
pub const DEFAULT_STORY_YEAR: i32 = 2025;
pub const DEFAULT_EVENT_SAMPLE_LIMIT: u32 = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub github_api_url: String,
    pub contributions_api_url: String,
    pub year: i32,
    pub event_sample_limit: u32,
    pub utc_offset_hours: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            contributions_api_url: DEFAULT_CONTRIBUTIONS_API_URL.to_string(),
            year: DEFAULT_STORY_YEAR,
            event_sample_limit: DEFAULT_EVENT_SAMPLE_LIMIT,
            utc_offset_hours: 0,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.trim().is_empty());

        let github_api_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string());

        let contributions_api_url = env::var("CONTRIBUTIONS_API_URL")
            .unwrap_or_else(|_| DEFAULT_CONTRIBUTIONS_API_URL.to_string());

        let year = parse_var("STORY_YEAR")?.unwrap_or(DEFAULT_STORY_YEAR);

        let event_sample_limit =
            parse_var("EVENT_SAMPLE_LIMIT")?.unwrap_or(DEFAULT_EVENT_SAMPLE_LIMIT);

        let utc_offset_hours = parse_var("STORY_UTC_OFFSET_HOURS")?.unwrap_or(0);

        let config = Self {
            github_token,
            github_api_url,
            contributions_api_url,
            year,
            event_sample_limit,
            utc_offset_hours,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_sample_limit == 0 {
            return Err(Error::Config(
                "EVENT_SAMPLE_LIMIT must be greater than zero".to_string(),
            ));
        }
        utc_offset(self.utc_offset_hours)?;
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value: {}", name, raw))),
        Err(_) => Ok(None),
    }
}

fn utc_offset(hours: i32) -> Result<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            Error::Config(format!(
                "UTC offset must be between -23 and 23 hours, got {}",
                hours
            ))
        })
}

/// Options the story pipeline needs once inputs are fetched.
#[derive(Debug, Clone)]
pub struct StoryOptions {
    pub year: i32,
    pub event_sample_limit: usize,
    pub utc_offset: FixedOffset,
}

impl Default for StoryOptions {
    fn default() -> Self {
        Self {
            year: DEFAULT_STORY_YEAR,
            event_sample_limit: DEFAULT_EVENT_SAMPLE_LIMIT as usize,
            utc_offset: Utc.fix(),
        }
    }
}

impl TryFrom<&Config> for StoryOptions {
    type Error = Error;

    fn try_from(config: &Config) -> Result<Self> {
        Ok(Self {
            year: config.year,
            event_sample_limit: config.event_sample_limit as usize,
            utc_offset: utc_offset(config.utc_offset_hours)?,
        })
    }
}
