pub mod client;
pub mod demo;
pub mod paginator;
pub mod rate_limiter;
pub mod source;

pub use client::GitHubClient;
pub use demo::DemoSource;
pub use paginator::Paginator;
pub use rate_limiter::RateLimiter;
pub use source::StorySource;
