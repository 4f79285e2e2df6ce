use serde::{Deserialize, Serialize};

use super::calendar::ActivityDay;

pub const WEEKDAY_LABELS: [&str; 7] = [
    "Sundays",
    "Mondays",
    "Tuesdays",
    "Wednesdays",
    "Thursdays",
    "Fridays",
    "Saturdays",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorySummary {
    pub username: String,
    pub display_name: String,
    pub avatar_url: String,
    pub year: i32,
    pub total_commits: u32,
    pub longest_streak: u32,
    /// 0 = Sunday .. 6 = Saturday
    pub busiest_weekday: usize,
    pub busiest_day: String,
    pub top_languages: Vec<LanguageStat>,
    pub top_repository: TopRepository,
    pub velocity: Vec<ActivityDay>,
    pub weekday_totals: [u32; 7],
    pub productivity: ProductivityProfile,
    pub archetype: Archetype,
    pub contribution_breakdown: ContributionBreakdown,
    pub community: CommunityStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub count: u32,
    pub percentage: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopRepository {
    pub name: String,
    pub description: String,
    pub stars: u32,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub url: String,
}

impl TopRepository {
    pub const SENTINEL_NAME: &'static str = "No Public Repos";

    /// Placeholder used when the account has no repositories.
    pub fn sentinel() -> Self {
        Self {
            name: Self::SENTINEL_NAME.to_string(),
            description: "Start coding to write history.".to_string(),
            stars: 0,
            language: None,
            topics: Vec::new(),
            url: String::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.name == Self::SENTINEL_NAME && self.url.is_empty()
    }
}

/// Yearly activity counts. `commits` comes from the calendar; the rest are estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    pub commits: u32,
    pub pull_requests: u32,
    pub issues: u32,
    pub reviews: u32,
}

impl ContributionBreakdown {
    pub fn total_activity(&self) -> u64 {
        self.commits as u64 + self.pull_requests as u64 + self.issues as u64 + self.reviews as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommunityStats {
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    pub total_stars: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    #[serde(rename = "Late Night")]
    LateNight,
}

impl TimeOfDay {
    /// Buckets an hour of day (0-23); 22:00 through 04:59 is late night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::LateNight,
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeOfDay::Morning => write!(f, "Morning"),
            TimeOfDay::Afternoon => write!(f, "Afternoon"),
            TimeOfDay::Evening => write!(f, "Evening"),
            TimeOfDay::LateNight => write!(f, "Late Night"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductivityProfile {
    pub peak_hour: u32,
    pub time_of_day: TimeOfDay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    #[serde(rename = "The Pull Request Pro")]
    PullRequestPro,
    #[serde(rename = "The Reviewer")]
    Reviewer,
    #[serde(rename = "The Weekend Warrior")]
    WeekendWarrior,
    #[serde(rename = "The Night Owl")]
    NightOwl,
    #[serde(rename = "The Early Bird")]
    EarlyBird,
    #[serde(rename = "The Grid Painter")]
    GridPainter,
    #[serde(rename = "The Consistent")]
    Consistent,
    #[serde(rename = "The Planner")]
    Planner,
    #[serde(rename = "The Community Star")]
    CommunityStar,
    #[serde(rename = "The Tinkerer")]
    Tinkerer,
}

impl Archetype {
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::PullRequestPro => "The Pull Request Pro",
            Archetype::Reviewer => "The Reviewer",
            Archetype::WeekendWarrior => "The Weekend Warrior",
            Archetype::NightOwl => "The Night Owl",
            Archetype::EarlyBird => "The Early Bird",
            Archetype::GridPainter => "The Grid Painter",
            Archetype::Consistent => "The Consistent",
            Archetype::Planner => "The Planner",
            Archetype::CommunityStar => "The Community Star",
            Archetype::Tinkerer => "The Tinkerer",
        }
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
