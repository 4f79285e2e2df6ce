use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use gitstory::analysis::RawStoryInputs;
use gitstory::github::DemoSource;
use gitstory::models::{Archetype, GitHubUser, SourceKind, TimeOfDay};
use gitstory::{build_story, Error, Result, StoryOptions, StoryPipeline, StorySource};

// ─── Helpers ───

/// In-memory source; `None` payloads fail like an unreachable endpoint.
#[derive(Default)]
struct StubSource {
    account: Option<GitHubUser>,
    calendar: Option<Value>,
    events: Option<Vec<Value>>,
    repositories: Option<Vec<Value>>,
}

#[async_trait]
impl StorySource for StubSource {
    async fn fetch_account(&self, username: &str) -> Result<GitHubUser> {
        self.account
            .clone()
            .ok_or_else(|| Error::UserNotFound(username.to_string()))
    }

    async fn fetch_calendar(&self, _username: &str, _year: i32) -> Result<Value> {
        self.calendar
            .clone()
            .ok_or_else(|| Error::GitHubApi("502 calendar".to_string()))
    }

    async fn fetch_events(&self, _username: &str, limit: usize) -> Result<Vec<Value>> {
        self.events
            .clone()
            .map(|events| events.into_iter().take(limit).collect())
            .ok_or_else(|| Error::unavailable(SourceKind::Events, "timed out"))
    }

    async fn fetch_repositories(&self, _username: &str) -> Result<Vec<Value>> {
        self.repositories
            .clone()
            .ok_or_else(|| Error::RateLimited(60))
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn account(login: &str) -> GitHubUser {
    GitHubUser {
        login: login.to_string(),
        name: Some("Octo Cat".to_string()),
        avatar_url: format!("https://avatars.example.com/{}", login),
        public_repos: 4,
        followers: 10,
        following: 2,
    }
}

/// Calendar of consecutive days starting on Wednesday 2025-01-01.
fn calendar(counts: &[i64]) -> Value {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let contributions: Vec<Value> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let date = start + Duration::days(i as i64);
            json!({"date": date.format("%Y-%m-%d").to_string(), "count": count, "level": 1})
        })
        .collect();
    json!({"total": {"2025": counts.iter().sum::<i64>()}, "contributions": contributions})
}

fn event(event_type: &str, created_at: &str) -> Value {
    json!({"id": "1", "type": event_type, "created_at": created_at})
}

fn repo(name: &str, stars: u32, language: Option<&str>) -> Value {
    json!({
        "name": name,
        "description": format!("{} description", name),
        "stargazers_count": stars,
        "language": language,
        "topics": ["rust"],
        "html_url": format!("https://github.com/octocat/{}", name),
    })
}

fn options() -> StoryOptions {
    StoryOptions {
        year: 2025,
        ..StoryOptions::default()
    }
}

// ═══════════════════════════════════════════════
// 1. Full pipeline
// ═══════════════════════════════════════════════

#[tokio::test]
async fn full_story_from_all_sources() {
    let source = StubSource {
        account: Some(account("octocat")),
        calendar: Some(calendar(&[1, 1, 0, 1, 1, 1, 0])),
        events: Some(vec![
            event("PushEvent", "2025-06-01T09:10:00Z"),
            event("PushEvent", "2025-06-01T09:40:00Z"),
            event("PullRequestEvent", "2025-06-02T15:00:00Z"),
            event("WatchEvent", "2025-06-03T09:00:00Z"),
        ]),
        repositories: Some(vec![
            repo("a", 3, Some("Go")),
            repo("b", 9, Some("Go")),
            repo("c", 9, Some("Rust")),
            repo("d", 1, None),
        ]),
    };

    let story = StoryPipeline::new(source, options())
        .generate("octocat")
        .await
        .unwrap();

    assert_eq!(story.username, "octocat");
    assert_eq!(story.display_name, "Octo Cat");
    assert_eq!(story.year, 2025);
    assert_eq!(story.total_commits, 5);
    assert_eq!(story.longest_streak, 3);
    assert_eq!(story.velocity.len(), 7);
    assert_eq!(story.weekday_totals.iter().sum::<u32>(), story.total_commits);

    // 5 commits / 2 sampled pushes = 2.5 per sampled event
    assert_eq!(story.contribution_breakdown.commits, 5);
    assert_eq!(story.contribution_breakdown.pull_requests, 3);
    assert_eq!(story.contribution_breakdown.issues, 0);
    assert_eq!(story.contribution_breakdown.reviews, 0);

    let languages: Vec<_> = story
        .top_languages
        .iter()
        .map(|l| (l.name.as_str(), l.count, l.percentage))
        .collect();
    assert_eq!(languages, vec![("Go", 2, 50), ("Rust", 1, 25)]);

    assert_eq!(story.top_repository.name, "b");
    assert_eq!(story.top_repository.stars, 9);
    assert_eq!(story.community.total_stars, 22);
    assert_eq!(story.community.followers, 10);

    assert_eq!(story.productivity.peak_hour, 9);
    assert_eq!(story.productivity.time_of_day, TimeOfDay::Morning);
    assert_eq!(story.archetype, Archetype::Tinkerer);
}

#[tokio::test]
async fn busiest_day_breaks_ties_toward_sunday() {
    // 2025-01-04 is a Saturday, 2025-01-05 a Sunday
    let source = StubSource {
        account: Some(account("octocat")),
        calendar: Some(calendar(&[0, 0, 0, 5, 5])),
        ..StubSource::default()
    };

    let story = StoryPipeline::new(source, options())
        .generate("octocat")
        .await
        .unwrap();

    assert_eq!(story.weekday_totals, [5, 0, 0, 0, 0, 0, 5]);
    assert_eq!(story.busiest_weekday, 0);
    assert_eq!(story.busiest_day, "Sundays");
}

// ═══════════════════════════════════════════════
// 2. Degraded inputs
// ═══════════════════════════════════════════════

#[tokio::test]
async fn unavailable_sources_fall_back_to_defaults() {
    let source = StubSource {
        account: Some(account("octocat")),
        ..StubSource::default()
    };

    let story = StoryPipeline::new(source, options())
        .generate("octocat")
        .await
        .unwrap();

    assert_eq!(story.total_commits, 0);
    assert_eq!(story.longest_streak, 0);
    assert!(story.velocity.is_empty());
    assert_eq!(story.top_languages.len(), 1);
    assert_eq!(story.top_languages[0].name, "Polyglot");
    assert_eq!(story.top_languages[0].percentage, 100);
    assert!(story.top_repository.is_sentinel());
    assert_eq!(story.top_repository.stars, 0);
    assert_eq!(story.productivity.peak_hour, 14);
    assert_eq!(story.productivity.time_of_day, TimeOfDay::Afternoon);
    assert_eq!(story.archetype, Archetype::Tinkerer);
}

#[tokio::test]
async fn malformed_records_are_skipped() {
    let mut payload = calendar(&[2, 2, 2]);
    payload["contributions"]
        .as_array_mut()
        .unwrap()
        .push(json!({"date": "2025-02-30", "count": 9}));

    let source = StubSource {
        account: Some(account("octocat")),
        calendar: Some(payload),
        events: Some(vec![
            event("PushEvent", "garbage"),
            json!("not an event"),
            event("PushEvent", "2025-03-03T23:30:00Z"),
        ]),
        repositories: Some(vec![json!({"stargazers_count": 5}), repo("ok", 2, Some("Rust"))]),
    };

    let story = StoryPipeline::new(source, options())
        .generate("octocat")
        .await
        .unwrap();

    assert_eq!(story.total_commits, 6);
    assert_eq!(story.velocity.len(), 3);
    assert_eq!(story.productivity.peak_hour, 23);
    assert_eq!(story.top_repository.name, "ok");
    assert_eq!(story.top_languages[0].percentage, 100);
}

#[test]
fn skipped_calendar_day_breaks_the_streak() {
    let mut payload = calendar(&[1, 1, 1]);
    payload["contributions"][1]["count"] = json!(-1);
    let inputs = RawStoryInputs {
        calendar: Some(payload),
        ..RawStoryInputs::default()
    };

    let story = build_story(&account("octocat"), &inputs, &options());

    assert_eq!(story.velocity.len(), 2);
    assert_eq!(story.total_commits, 2);
    assert_eq!(story.longest_streak, 1);
}

#[tokio::test]
async fn missing_account_is_fatal() {
    let source = StubSource {
        calendar: Some(calendar(&[1])),
        ..StubSource::default()
    };

    let result = StoryPipeline::new(source, options()).generate("ghost").await;

    assert!(matches!(result, Err(Error::UserNotFound(ref login)) if login == "ghost"));
}

// ═══════════════════════════════════════════════
// 3. Determinism and demo
// ═══════════════════════════════════════════════

#[test]
fn identical_inputs_give_identical_stories() {
    let inputs = RawStoryInputs {
        calendar: Some(calendar(&[4, 0, 7, 7, 1, 0, 3, 3, 3])),
        events: Some(vec![
            event("PushEvent", "2025-04-01T01:00:00Z"),
            event("IssuesEvent", "2025-04-01T01:30:00Z"),
            event("PullRequestReviewEvent", "2025-04-02T17:00:00Z"),
        ]),
        repositories: Some(vec![repo("x", 4, Some("Python")), repo("y", 4, Some("Go"))]),
    };

    let first = build_story(&account("octocat"), &inputs, &options());
    let second = build_story(&account("octocat"), &inputs, &options());

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn demo_story_is_a_night_owl() {
    let story = StoryPipeline::new(DemoSource::new(), options())
        .generate("demo")
        .await
        .unwrap();

    assert_eq!(story.username, "demo");
    assert_eq!(story.velocity.len(), 365);
    assert!(story.velocity.iter().all(|d| d.date.year() == 2025));
    assert_eq!(story.productivity.peak_hour, 22);
    assert_eq!(story.archetype, Archetype::NightOwl);
    assert_eq!(story.top_repository.name, "story-engine");
    assert_eq!(story.top_languages[0].name, "TypeScript");
    assert_eq!(story.top_languages[0].percentage, 33);
    assert_eq!(story.community.total_stars, 1310);
}
