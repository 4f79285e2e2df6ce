use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use serde_json::{json, Value};

use crate::config::DEFAULT_STORY_YEAR;
use crate::error::{Error, Result};
use crate::github::source::StorySource;
use crate::models::{GitHubUser, SourceKind};

pub const DEMO_USERNAME: &str = "demo";

const DEMO_EVENT_HOURS: [u32; 6] = [22, 23, 1, 21, 22, 14];

/// Canned, network-free account used for `demo` stories.
///
/// Events fall in the last weeks of `year`, so they line up with its calendar.
#[derive(Debug, Clone)]
pub struct DemoSource {
    year: i32,
}

impl DemoSource {
    pub fn new() -> Self {
        Self::for_year(DEFAULT_STORY_YEAR)
    }

    pub fn for_year(year: i32) -> Self {
        Self { year }
    }

    pub fn handles(username: &str) -> bool {
        username.trim().eq_ignore_ascii_case(DEMO_USERNAME)
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new()
    }
}

fn demo_commits(date: NaiveDate) -> u32 {
    let ordinal = date.ordinal();
    let weekday = date.weekday().num_days_from_sunday();
    if ordinal % 9 == 0 || ordinal % 13 == 5 {
        return 0;
    }
    let base = if weekday == 0 || weekday == 6 { 1 } else { 3 };
    (ordinal * 7 + weekday * 5) % 12 + base
}

fn demo_event_type(index: usize) -> &'static str {
    match (index % 10, index % 20) {
        (7, _) => "PullRequestEvent",
        (8, _) => "IssuesEvent",
        (_, 9) => "PullRequestReviewEvent",
        _ => "PushEvent",
    }
}

#[async_trait]
impl StorySource for DemoSource {
    async fn fetch_account(&self, _username: &str) -> Result<GitHubUser> {
        Ok(GitHubUser {
            login: DEMO_USERNAME.to_string(),
            name: Some("Demo Developer".to_string()),
            avatar_url: "https://avatars.githubusercontent.com/u/583231".to_string(),
            public_repos: 6,
            followers: 1337,
            following: 42,
        })
    }

    async fn fetch_calendar(&self, _username: &str, year: i32) -> Result<Value> {
        let mut date = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| {
            Error::unavailable(SourceKind::Calendar, format!("no calendar for year {}", year))
        })?;

        let mut contributions = Vec::new();
        while date.year() == year {
            contributions.push(json!({
                "date": date.format("%Y-%m-%d").to_string(),
                "count": demo_commits(date),
            }));
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        Ok(json!({ "contributions": contributions }))
    }

    async fn fetch_events(&self, _username: &str, limit: usize) -> Result<Vec<Value>> {
        Ok((0..60usize)
            .take(limit)
            .map(|i| {
                json!({
                    "type": demo_event_type(i),
                    "created_at": format!(
                        "{:04}-12-{:02}T{:02}:{:02}:00Z",
                        self.year,
                        28 - i / 3,
                        DEMO_EVENT_HOURS[i % DEMO_EVENT_HOURS.len()],
                        (i * 7) % 60
                    ),
                })
            })
            .collect())
    }

    async fn fetch_repositories(&self, _username: &str) -> Result<Vec<Value>> {
        Ok(vec![
            json!({
                "name": "story-engine",
                "description": "Turns a year of commits into a story",
                "stargazers_count": 842,
                "language": "TypeScript",
                "topics": ["visualization", "github"],
                "html_url": "https://github.com/demo/story-engine",
            }),
            json!({
                "name": "dotfiles",
                "description": null,
                "stargazers_count": 12,
                "language": "Shell",
                "topics": [],
                "html_url": "https://github.com/demo/dotfiles",
            }),
            json!({
                "name": "fast-grid",
                "description": "Contribution grid renderer",
                "stargazers_count": 311,
                "language": "Rust",
                "topics": ["wasm"],
                "html_url": "https://github.com/demo/fast-grid",
            }),
            json!({
                "name": "dashboard",
                "description": "Personal metrics dashboard",
                "stargazers_count": 57,
                "language": "TypeScript",
                "topics": ["react"],
                "html_url": "https://github.com/demo/dashboard",
            }),
            json!({
                "name": "crawler",
                "description": "Polite web crawler",
                "stargazers_count": 88,
                "language": "Go",
                "topics": [],
                "html_url": "https://github.com/demo/crawler",
            }),
            json!({
                "name": "notes",
                "description": "Scratch space",
                "stargazers_count": 0,
                "language": null,
                "topics": [],
                "html_url": "https://github.com/demo/notes",
            }),
        ])
    }

    fn name(&self) -> &str {
        "demo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_demo_username() {
        assert!(DemoSource::handles("demo"));
        assert!(DemoSource::handles(" DEMO "));
        assert!(!DemoSource::handles("octocat"));
    }

    #[tokio::test]
    async fn test_demo_calendar_covers_whole_year() {
        let source = DemoSource::new();
        let calendar = source.fetch_calendar(DEMO_USERNAME, 2024).await.unwrap();
        let days = calendar["contributions"].as_array().unwrap();
        assert_eq!(days.len(), 366);
        assert_eq!(days[0]["date"], "2024-01-01");
        assert_eq!(days[365]["date"], "2024-12-31");
    }

    #[tokio::test]
    async fn test_demo_events_respect_limit() {
        let source = DemoSource::new();
        assert_eq!(source.fetch_events(DEMO_USERNAME, 100).await.unwrap().len(), 60);
        assert_eq!(source.fetch_events(DEMO_USERNAME, 10).await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_demo_events_follow_requested_year() {
        let source = DemoSource::for_year(2024);
        let events = source.fetch_events(DEMO_USERNAME, 100).await.unwrap();
        assert!(events
            .iter()
            .all(|e| e["created_at"].as_str().unwrap().starts_with("2024-12-")));
    }
}
