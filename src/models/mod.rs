pub mod user;
pub mod calendar;
pub mod event;
pub mod repository;
pub mod story;

pub use user::*;
pub use calendar::*;
pub use event::*;
pub use repository::*;
pub use story::*;

use serde::{Deserialize, Serialize};

/// The three independently fetched story inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Calendar,
    Events,
    Repositories,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Calendar => write!(f, "calendar"),
            SourceKind::Events => write!(f, "events"),
            SourceKind::Repositories => write!(f, "repositories"),
        }
    }
}
