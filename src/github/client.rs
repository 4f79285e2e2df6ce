use async_trait::async_trait;
use reqwest::header::{self, HeaderMap};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::rate_limiter::{seconds_until_reset, RateLimiter};
use crate::github::source::StorySource;
use crate::models::GitHubUser;

/// Upper bound on repositories considered; the story reads a single page.
const MAX_REPOSITORIES: usize = 100;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    token: Option<String>,
    base_url: String,
    contributions_url: String,
}

impl GitHubClient {
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::from_config(&Config {
            github_token: token.map(str::to_string),
            ..Config::default()
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("gitstory/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            token: config.github_token.clone(),
            base_url: config.github_api_url.trim_end_matches('/').to_string(),
            contributions_url: config.contributions_api_url.trim_end_matches('/').to_string(),
        })
    }

    fn api_request(&self, url: &str) -> Result<RequestBuilder> {
        let mut request = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        if let Some(ref token) = self.token {
            request = request.header(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }

        Ok(request)
    }

    /// Sends a rate-limited GET to the GitHub API and rejects non-success statuses.
    pub async fn send_api_request(&self, url: &str) -> Result<Response> {
        self.rate_limiter.wait().await;
        let response = self.api_request(url)?.send().await?;
        self.rate_limiter.record(response.headers()).await;
        check_status(response, url).await
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        self.rate_limiter.wait().await;
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = self.api_request(&url)?.send().await?;
        self.rate_limiter.record(response.headers()).await;

        if let Some(err) = account_failure(response.status(), response.headers(), username) {
            return Err(err);
        }

        let response = check_status(response, &url).await?;
        Ok(response.json().await?)
    }

    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Value>> {
        let url = format!("{}/users/{}/repos?sort=pushed&type=all", self.base_url, username);
        tracing::info!("Fetching repositories for: {}", username);
        Paginator::new(self)
            .fetch_limited(&url, 100, MAX_REPOSITORIES)
            .await
    }

    pub async fn get_user_events(&self, username: &str, limit: usize) -> Result<Vec<Value>> {
        let url = format!("{}/users/{}/events", self.base_url, username);
        tracing::info!("Fetching recent events for: {}", username);
        Paginator::new(self)
            .fetch_limited(&url, limit.min(100) as u32, limit)
            .await
    }

    pub async fn get_contribution_calendar(&self, username: &str, year: i32) -> Result<Value> {
        let url = format!("{}/{}?y={}", self.contributions_url, username, year);
        tracing::info!("Fetching {} contribution calendar for: {}", year, username);

        let response = self.client.get(&url).send().await?;
        let response = check_status(response, &url).await?;
        Ok(response.json().await?)
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

async fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if let Some(err) = rate_limit_failure(status, response.headers()) {
        return Err(err);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::GitHubApi(format!(
        "{} {} - {}",
        status.as_u16(),
        url,
        body
    )))
}

/// 429, or a 403 that carries rate limit headers (primary or secondary limit).
fn rate_limit_failure(status: StatusCode, headers: &HeaderMap) -> Option<Error> {
    let exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        == Some("0");
    let secondary = headers.contains_key(header::RETRY_AFTER);

    let limited = status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && (exhausted || secondary));
    limited.then(|| Error::RateLimited(seconds_until_reset(headers).unwrap_or(60)))
}

/// The account lookup treats every 403 as rate limiting.
fn account_failure(status: StatusCode, headers: &HeaderMap, username: &str) -> Option<Error> {
    match status {
        StatusCode::NOT_FOUND => Some(Error::UserNotFound(username.to_string())),
        StatusCode::FORBIDDEN => {
            let retry_after = seconds_until_reset(headers).unwrap_or(60);
            Some(Error::RateLimited(retry_after))
        }
        _ => rate_limit_failure(status, headers),
    }
}

#[async_trait]
impl StorySource for GitHubClient {
    async fn fetch_account(&self, username: &str) -> Result<GitHubUser> {
        self.get_user(username).await
    }

    async fn fetch_calendar(&self, username: &str, year: i32) -> Result<Value> {
        self.get_contribution_calendar(username, year).await
    }

    async fn fetch_events(&self, username: &str, limit: usize) -> Result<Vec<Value>> {
        self.get_user_events(username, limit).await
    }

    async fn fetch_repositories(&self, username: &str) -> Result<Vec<Value>> {
        self.get_user_repos(username).await
    }

    fn name(&self) -> &str {
        "github"
    }
}
