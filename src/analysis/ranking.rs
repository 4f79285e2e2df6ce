use std::collections::HashMap;

use crate::models::{CommunityStats, GitHubUser, LanguageStat, RepositorySummary, TopRepository};
use crate::taxonomy::{language_color, POLYGLOT_COLOR};

pub const TOP_LANGUAGE_COUNT: usize = 3;
pub const POLYGLOT: &str = "Polyglot";

/// Top languages by number of repositories declaring them as primary.
///
/// Equal counts keep first-encountered order. Percentages are relative to all
/// repositories, including those without a language. Never returns an empty list.
pub fn rank_languages(repositories: &[RepositorySummary]) -> Vec<LanguageStat> {
    let mut counts: Vec<(&str, u32)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for language in repositories.iter().filter_map(|r| r.primary_language.as_deref()) {
        match index.get(language) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(language, counts.len());
                counts.push((language, 1));
            }
        }
    }

    // Vec::sort_by is stable
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = repositories.len();
    let ranked: Vec<LanguageStat> = counts
        .into_iter()
        .take(TOP_LANGUAGE_COUNT)
        .map(|(name, count)| LanguageStat {
            name: name.to_string(),
            count,
            percentage: percentage_of(count, total),
            color: language_color(name).to_string(),
        })
        .collect();

    if ranked.is_empty() {
        return vec![polyglot()];
    }
    ranked
}

fn percentage_of(count: u32, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

fn polyglot() -> LanguageStat {
    LanguageStat {
        name: POLYGLOT.to_string(),
        count: 1,
        percentage: 100,
        color: POLYGLOT_COLOR.to_string(),
    }
}

/// Most-starred repository; the first one wins ties.
pub fn select_top_repository(repositories: &[RepositorySummary]) -> TopRepository {
    let mut best: Option<&RepositorySummary> = None;
    for repo in repositories {
        if best.map_or(true, |b| repo.star_count > b.star_count) {
            best = Some(repo);
        }
    }

    match best {
        Some(repo) => TopRepository {
            name: repo.name.clone(),
            description: repo
                .description
                .clone()
                .unwrap_or_else(|| "No description provided.".to_string()),
            stars: repo.star_count,
            language: repo.primary_language.clone(),
            topics: repo.topics.iter().cloned().collect(),
            url: repo.url.clone(),
        },
        None => TopRepository::sentinel(),
    }
}

pub fn community_stats(account: &GitHubUser, repositories: &[RepositorySummary]) -> CommunityStats {
    CommunityStats {
        followers: account.followers,
        following: account.following,
        public_repos: account.public_repos,
        total_stars: repositories.iter().map(|r| r.star_count as u64).sum(),
    }
}
