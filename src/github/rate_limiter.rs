use reqwest::header::HeaderMap;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};

const DEFAULT_REQUESTS_PER_MINUTE: u32 = 30;

pub struct RateLimiter {
    state: Arc<Mutex<RateLimitState>>,
    requests_per_minute: u32,
}

struct RateLimitState {
    remaining: Option<u32>,
    reset_at: Option<Instant>,
    requests_this_minute: u32,
    minute_start: Instant,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_budget(DEFAULT_REQUESTS_PER_MINUTE)
    }

    pub fn with_budget(requests_per_minute: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(RateLimitState {
                remaining: None,
                reset_at: None,
                requests_this_minute: 0,
                minute_start: Instant::now(),
            })),
            requests_per_minute: requests_per_minute.max(1),
        }
    }

    /// Waits until another request may be sent.
    pub async fn wait(&self) {
        let mut state = self.state.lock().await;

        if state.remaining == Some(0) {
            if let Some(reset_at) = state.reset_at {
                let now = Instant::now();
                if reset_at > now {
                    let wait_duration = reset_at - now;
                    drop(state);
                    tracing::info!("Rate limited, waiting {:?}", wait_duration);
                    sleep(wait_duration).await;
                    state = self.state.lock().await;
                    state.remaining = None;
                }
            }
        }

        let minute_elapsed = state.minute_start.elapsed();
        if minute_elapsed < Duration::from_secs(60) {
            if state.requests_this_minute >= self.requests_per_minute {
                let wait_time = Duration::from_secs(60) - minute_elapsed;
                drop(state);
                tracing::debug!("Soft rate limiting, waiting {:?}", wait_time);
                sleep(wait_time).await;
                state = self.state.lock().await;
                state.requests_this_minute = 0;
                state.minute_start = Instant::now();
            }
        } else {
            state.requests_this_minute = 0;
            state.minute_start = Instant::now();
        }

        state.requests_this_minute += 1;
    }

    /// Records the `x-ratelimit-*` headers of a GitHub response.
    pub async fn record(&self, headers: &HeaderMap) {
        let Some(remaining) = header_number::<u32>(headers, "x-ratelimit-remaining") else {
            return;
        };

        let mut state = self.state.lock().await;
        state.remaining = Some(remaining);
        state.reset_at = seconds_until_reset(headers)
            .map(|secs| Instant::now() + Duration::from_secs(secs));
    }

    pub async fn remaining(&self) -> Option<u32> {
        self.state.lock().await.remaining
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Seconds until the quota resets, from `retry-after` or `x-ratelimit-reset`.
pub fn seconds_until_reset(headers: &HeaderMap) -> Option<u64> {
    if let Some(retry_after) = header_number::<u64>(headers, "retry-after") {
        return Some(retry_after);
    }

    let reset_timestamp = header_number::<u64>(headers, "x-ratelimit-reset")?;
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    (reset_timestamp > now).then(|| reset_timestamp - now)
}
