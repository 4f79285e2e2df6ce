use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry of the contributions API `contributions` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RawContributionDay {
    pub date: String,
    #[serde(default)]
    pub count: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub commits: u32,
}

impl ActivityDay {
    pub fn new(date: NaiveDate, commits: u32) -> Self {
        Self { date, commits }
    }

    pub fn is_active(&self) -> bool {
        self.commits > 0
    }
}
