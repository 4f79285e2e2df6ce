use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::GitHubClient;

/// Page-by-page fetch of a GitHub list endpoint, stopping at a hard item cap.
pub struct Paginator<'a> {
    github: &'a GitHubClient,
}

impl<'a> Paginator<'a> {
    pub fn new(github: &'a GitHubClient) -> Self {
        Self { github }
    }

    pub async fn fetch_limited<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
        max_items: usize,
    ) -> Result<Vec<T>> {
        let per_page = per_page.clamp(1, 100);
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let separator = if base_url.contains('?') { "&" } else { "?" };
            let url = format!("{}{}per_page={}&page={}", base_url, separator, per_page, page);

            tracing::debug!("Fetching: {}", url);
            let response = self.github.send_api_request(&url).await?;
            let has_next = has_next_page(response.headers());

            let items: Vec<T> = response.json().await?;
            let items_count = items.len();
            all_items.extend(items);

            if all_items.len() >= max_items || !has_next || items_count < per_page as usize {
                break;
            }

            page += 1;
        }

        all_items.truncate(max_items);
        Ok(all_items)
    }
}

fn has_next_page(headers: &HeaderMap) -> bool {
    headers
        .get("link")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("rel=\"next\""))
        .unwrap_or(false)
}
