use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::GitHubUser;

/// Where the raw story inputs come from.
///
/// The calendar, events and repositories payloads are returned untyped so that
/// malformed records can be rejected one by one during normalization rather
/// than failing the whole response.
#[async_trait]
pub trait StorySource: Send + Sync {
    /// Account lookup. A failure here aborts the story.
    async fn fetch_account(&self, username: &str) -> Result<GitHubUser>;

    /// Contribution calendar body for `year`, containing a `contributions` array.
    async fn fetch_calendar(&self, username: &str, year: i32) -> Result<Value>;

    /// Most recent activity events, newest first, at most `limit` entries.
    async fn fetch_events(&self, username: &str, limit: usize) -> Result<Vec<Value>>;

    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Value>>;

    fn name(&self) -> &str;
}
