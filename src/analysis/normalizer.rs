//! Input shaping.
//!
//! Turns the three raw payloads into typed, ordered sequences. A missing payload
//! becomes an empty sequence; a malformed record is skipped and counted.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde_json::Value;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::models::{
    ActivityDay, ActivityEvent, EventKind, RawContributionDay, RawEvent, RawRepository,
    RepositorySummary, SourceKind,
};

/// Raw payloads as delivered by a [`crate::github::StorySource`].
/// `None` means the source could not be fetched.
#[derive(Debug, Clone, Default)]
pub struct RawStoryInputs {
    pub calendar: Option<Value>,
    pub events: Option<Vec<Value>>,
    pub repositories: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkippedRecords {
    pub calendar: usize,
    pub events: usize,
    pub repositories: usize,
}

impl SkippedRecords {
    pub fn total(&self) -> usize {
        self.calendar + self.events + self.repositories
    }
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedInputs {
    /// Chronological, one entry per date.
    pub days: Vec<ActivityDay>,
    pub events: Vec<ActivityEvent>,
    pub repositories: Vec<RepositorySummary>,
    pub skipped: SkippedRecords,
}

pub struct InputNormalizer {
    year: i32,
    event_limit: usize,
}

impl InputNormalizer {
    pub fn new(year: i32, event_limit: usize) -> Self {
        Self { year, event_limit }
    }

    pub fn normalize(&self, raw: &RawStoryInputs) -> NormalizedInputs {
        let (days, skipped_days) = self.normalize_calendar(raw.calendar.as_ref());
        let (events, skipped_events) = self.normalize_events(raw.events.as_deref());
        let (repositories, skipped_repos) =
            self.normalize_repositories(raw.repositories.as_deref());

        let skipped = SkippedRecords {
            calendar: skipped_days,
            events: skipped_events,
            repositories: skipped_repos,
        };
        if skipped.total() > 0 {
            tracing::warn!(
                "Skipped malformed records: {} calendar, {} events, {} repositories",
                skipped.calendar,
                skipped.events,
                skipped.repositories
            );
        }

        NormalizedInputs {
            days,
            events,
            repositories,
            skipped,
        }
    }

    /// Sorted by date; when a date repeats, the last record seen wins.
    pub fn normalize_calendar(&self, payload: Option<&Value>) -> (Vec<ActivityDay>, usize) {
        let Some(payload) = payload else {
            return (Vec::new(), 0);
        };

        let entries = match payload {
            Value::Array(entries) => entries,
            other => match other.get("contributions").and_then(Value::as_array) {
                Some(entries) => entries,
                None => {
                    tracing::warn!(
                        "{}",
                        Error::malformed(SourceKind::Calendar, "payload has no contributions array")
                    );
                    return (Vec::new(), 0);
                }
            },
        };

        let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        let mut skipped = 0;

        for entry in entries {
            match parse_day(entry, self.year) {
                Ok(day) => match by_date.entry(day.date) {
                    Entry::Occupied(mut existing) => {
                        tracing::debug!("Duplicate calendar date {}, keeping latest", day.date);
                        existing.insert(day.commits);
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(day.commits);
                    }
                },
                Err(e) => {
                    tracing::debug!("{}", e);
                    skipped += 1;
                }
            }
        }

        let days = by_date
            .into_iter()
            .map(|(date, commits)| ActivityDay::new(date, commits))
            .collect();
        (days, skipped)
    }

    /// Keeps source order and stops once the sample cap is reached.
    pub fn normalize_events(&self, payload: Option<&[Value]>) -> (Vec<ActivityEvent>, usize) {
        let Some(entries) = payload else {
            return (Vec::new(), 0);
        };

        let mut events = Vec::with_capacity(entries.len().min(self.event_limit));
        let mut skipped = 0;

        for entry in entries {
            if events.len() >= self.event_limit {
                break;
            }
            match parse_event(entry) {
                Ok(event) => events.push(event),
                Err(e) => {
                    tracing::debug!("{}", e);
                    skipped += 1;
                }
            }
        }

        (events, skipped)
    }

    pub fn normalize_repositories(
        &self,
        payload: Option<&[Value]>,
    ) -> (Vec<RepositorySummary>, usize) {
        let Some(entries) = payload else {
            return (Vec::new(), 0);
        };

        let mut repositories = Vec::with_capacity(entries.len());
        let mut skipped = 0;

        for entry in entries {
            match parse_repository(entry) {
                Ok(repo) => repositories.push(repo),
                Err(e) => {
                    tracing::debug!("{}", e);
                    skipped += 1;
                }
            }
        }

        (repositories, skipped)
    }
}

fn parse_day(value: &Value, year: i32) -> Result<ActivityDay> {
    let raw: RawContributionDay = serde_json::from_value(value.clone())
        .map_err(|e| Error::malformed(SourceKind::Calendar, e.to_string()))?;

    let date = NaiveDate::parse_from_str(raw.date.trim(), "%Y-%m-%d").map_err(|_| {
        Error::malformed(SourceKind::Calendar, format!("bad date '{}'", raw.date))
    })?;

    if date.year() != year {
        return Err(Error::malformed(
            SourceKind::Calendar,
            format!("{} is outside {}", date, year),
        ));
    }

    let commits = u32::try_from(raw.count.unwrap_or(0)).map_err(|_| {
        Error::malformed(
            SourceKind::Calendar,
            format!("bad count {:?} on {}", raw.count, date),
        )
    })?;

    Ok(ActivityDay::new(date, commits))
}

fn parse_event(value: &Value) -> Result<ActivityEvent> {
    let raw: RawEvent = serde_json::from_value(value.clone())
        .map_err(|e| Error::malformed(SourceKind::Events, e.to_string()))?;

    let created_at = raw
        .created_at
        .ok_or_else(|| Error::malformed(SourceKind::Events, "missing created_at"))?;

    let timestamp = DateTime::parse_from_rfc3339(created_at.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            Error::malformed(SourceKind::Events, format!("bad timestamp '{}'", created_at))
        })?;

    let kind = raw
        .event_type
        .as_deref()
        .map(EventKind::from_api_type)
        .unwrap_or(EventKind::Other);

    Ok(ActivityEvent { kind, timestamp })
}

fn parse_repository(value: &Value) -> Result<RepositorySummary> {
    let raw: RawRepository = serde_json::from_value(value.clone())
        .map_err(|e| Error::malformed(SourceKind::Repositories, e.to_string()))?;

    let name = raw.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::malformed(SourceKind::Repositories, "empty name"));
    }

    let primary_language = raw
        .language
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    let topics: BTreeSet<String> = raw
        .topics
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    Ok(RepositorySummary {
        name,
        description: raw.description.filter(|d| !d.trim().is_empty()),
        star_count: raw.stargazers_count,
        primary_language,
        topics,
        url: raw.html_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_missing_sources_yield_empty_sequences() {
        let normalized = InputNormalizer::new(2025, 100).normalize(&RawStoryInputs::default());
        assert!(normalized.days.is_empty());
        assert!(normalized.events.is_empty());
        assert!(normalized.repositories.is_empty());
        assert_eq!(normalized.skipped, SkippedRecords::default());
    }

    #[test]
    fn test_calendar_sorted_deduplicated_and_filtered() {
        let payload = json!({
            "total": {"2025": 9},
            "contributions": [
                {"date": "2025-01-03", "count": 2, "level": 1},
                {"date": "2025-01-01", "count": 4, "level": 2},
                {"date": "2025-01-02"},
                {"date": "2025-01-03", "count": 3, "level": 1},
                {"date": "not-a-date", "count": 1},
                {"date": "2024-12-31", "count": 8},
                {"date": "2025-01-04", "count": -2},
                {"count": 5}
            ]
        });

        let (days, skipped) = InputNormalizer::new(2025, 100).normalize_calendar(Some(&payload));

        assert_eq!(
            days,
            vec![
                ActivityDay::new(date(2025, 1, 1), 4),
                ActivityDay::new(date(2025, 1, 2), 0),
                ActivityDay::new(date(2025, 1, 3), 3),
            ]
        );
        assert_eq!(skipped, 4);
    }

    #[test]
    fn test_calendar_without_contributions_is_empty() {
        let payload = json!({"error": "user not found"});
        let (days, skipped) = InputNormalizer::new(2025, 100).normalize_calendar(Some(&payload));
        assert!(days.is_empty());
        assert_eq!(skipped, 0);
    }

    #[test]
    fn test_events_parsed_and_capped() {
        let payload = vec![
            json!({"type": "PushEvent", "created_at": "2025-06-01T22:15:00Z"}),
            json!({"type": "WatchEvent", "created_at": "2025-06-01T21:00:00Z"}),
            json!({"type": "IssuesEvent", "created_at": "yesterday"}),
            json!({"type": "PullRequestEvent"}),
            json!({"type": "PullRequestReviewEvent", "created_at": "2025-05-30T09:00:00+02:00"}),
            json!({"type": "PushEvent", "created_at": "2025-05-29T10:00:00Z"}),
        ];

        let (events, skipped) = InputNormalizer::new(2025, 3).normalize_events(Some(&payload));

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, EventKind::Push);
        assert_eq!(events[1].kind, EventKind::Other);
        assert_eq!(events[2].kind, EventKind::Review);
        assert_eq!(events[2].timestamp.to_rfc3339(), "2025-05-30T07:00:00+00:00");
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_repositories_shaped() {
        let payload = vec![
            json!({
                "name": "gitstory",
                "description": "",
                "stargazers_count": 7,
                "language": "Rust",
                "topics": ["cli", "github", "cli"],
                "html_url": "https://github.com/octocat/gitstory"
            }),
            json!({"name": "scratch", "language": null}),
            json!({"name": "broken", "stargazers_count": "many"}),
            json!({"name": "  "}),
        ];

        let (repos, skipped) =
            InputNormalizer::new(2025, 100).normalize_repositories(Some(&payload));

        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "gitstory");
        assert_eq!(repos[0].description, None);
        assert_eq!(repos[0].star_count, 7);
        assert_eq!(repos[0].primary_language.as_deref(), Some("Rust"));
        assert_eq!(repos[0].topics.len(), 2);
        assert_eq!(repos[1].primary_language, None);
        assert_eq!(repos[1].star_count, 0);
        assert_eq!(skipped, 2);
    }
}
