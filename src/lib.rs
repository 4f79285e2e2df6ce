pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod taxonomy;
pub mod analysis;

pub use config::{Config, StoryOptions};
pub use error::{Error, Result};
pub use github::{DemoSource, GitHubClient, StorySource};
pub use analysis::{build_story, StoryPipeline};
pub use models::StorySummary;
