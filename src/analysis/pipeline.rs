use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

use crate::analysis::archetype::{classify, ArchetypeSignals};
use crate::analysis::composition::{extrapolate_breakdown, FallbackRules, SampleCounts};
use crate::analysis::normalizer::{InputNormalizer, RawStoryInputs};
use crate::analysis::productivity::profile_productivity;
use crate::analysis::ranking::{community_stats, rank_languages, select_top_repository};
use crate::analysis::velocity::analyze_velocity;
use crate::config::StoryOptions;
use crate::error::{Error, Result};
use crate::github::StorySource;
use crate::models::{GitHubUser, SourceKind, StorySummary, WEEKDAY_LABELS};

pub struct StoryPipeline {
    source: Arc<dyn StorySource>,
    options: StoryOptions,
    fallback_rules: FallbackRules,
}

impl StoryPipeline {
    pub fn new(source: impl StorySource + 'static, options: StoryOptions) -> Self {
        Self {
            source: Arc::new(source),
            options,
            fallback_rules: FallbackRules::default(),
        }
    }

    pub fn options(&self) -> &StoryOptions {
        &self.options
    }

    pub async fn generate(&self, username: &str) -> Result<StorySummary> {
        // Step 1: the account must exist
        tracing::info!("Fetching account {} from {}", username, self.source.name());
        let account = self.source.fetch_account(username).await?;

        // Step 2: the three story inputs, fetched concurrently
        let inputs = self.fetch_inputs(&account.login).await;

        // Step 3: derive the story
        tracing::info!("Building {} story for {}", self.options.year, account.login);
        Ok(build_story_with_rules(
            &account,
            &inputs,
            &self.options,
            &self.fallback_rules,
        ))
    }

    /// Fetches calendar, events and repositories. A failed fetch is logged
    /// and left as `None`.
    pub async fn fetch_inputs(&self, username: &str) -> RawStoryInputs {
        let pb = ProgressBar::new(3);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sources",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let calendar = async {
            let result = self.source.fetch_calendar(username, self.options.year).await;
            pb.inc(1);
            recover(SourceKind::Calendar, result)
        };
        let events = async {
            let result = self
                .source
                .fetch_events(username, self.options.event_sample_limit)
                .await;
            pb.inc(1);
            recover(SourceKind::Events, result)
        };
        let repositories = async {
            let result = self.source.fetch_repositories(username).await;
            pb.inc(1);
            recover(SourceKind::Repositories, result)
        };

        let (calendar, events, repositories) = futures::join!(calendar, events, repositories);
        pb.finish_and_clear();

        RawStoryInputs {
            calendar,
            events,
            repositories,
        }
    }
}

fn recover<T>(kind: SourceKind, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            let reason = e.to_string();
            tracing::warn!(
                "{}; continuing without it",
                Error::unavailable(kind, reason)
            );
            None
        }
    }
}

/// Derives the story from already-fetched inputs. Deterministic and free of I/O.
pub fn build_story(
    account: &GitHubUser,
    inputs: &RawStoryInputs,
    options: &StoryOptions,
) -> StorySummary {
    build_story_with_rules(account, inputs, options, &FallbackRules::default())
}

pub fn build_story_with_rules(
    account: &GitHubUser,
    inputs: &RawStoryInputs,
    options: &StoryOptions,
    fallback_rules: &FallbackRules,
) -> StorySummary {
    let normalized =
        InputNormalizer::new(options.year, options.event_sample_limit).normalize(inputs);

    let velocity = analyze_velocity(&normalized.days);
    tracing::debug!(
        "{} commits over {} days, longest streak {}",
        velocity.total_commits,
        velocity.series.len(),
        velocity.longest_streak
    );

    let sample = SampleCounts::from_events(&normalized.events);
    let breakdown = extrapolate_breakdown(&sample, velocity.total_commits, fallback_rules);

    let top_languages = rank_languages(&normalized.repositories);
    let top_repository = select_top_repository(&normalized.repositories);
    let community = community_stats(account, &normalized.repositories);

    let productivity = profile_productivity(&normalized.events, &options.utc_offset);

    let archetype = classify(&ArchetypeSignals {
        breakdown,
        community,
        total_commits: velocity.total_commits,
        productivity,
        weekday_totals: velocity.weekday_totals,
    });

    StorySummary {
        username: account.login.clone(),
        display_name: account.display_name().to_string(),
        avatar_url: account.avatar_url.clone(),
        year: options.year,
        total_commits: velocity.total_commits,
        longest_streak: velocity.longest_streak,
        busiest_weekday: velocity.busiest_weekday,
        busiest_day: WEEKDAY_LABELS[velocity.busiest_weekday].to_string(),
        top_languages,
        top_repository,
        velocity: velocity.series,
        weekday_totals: velocity.weekday_totals,
        productivity,
        archetype,
        contribution_breakdown: breakdown,
        community,
    }
}
