//! Yearly activity mix estimated from a short recent event sample.
//!
//! The sample only covers recent activity, so its counts are used as ratios:
//! each type is scaled by `total_commits / push_events_in_sample`.

use crate::models::{ActivityEvent, ContributionBreakdown, EventKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleCounts {
    pub pushes: u32,
    pub pull_requests: u32,
    pub issues: u32,
    pub reviews: u32,
    pub other: u32,
}

impl SampleCounts {
    pub fn from_events(events: &[ActivityEvent]) -> Self {
        events.iter().fold(Self::default(), |mut counts, event| {
            match event.kind {
                EventKind::Push => counts.pushes += 1,
                EventKind::PullRequest => counts.pull_requests += 1,
                EventKind::Issue => counts.issues += 1,
                EventKind::Review => counts.reviews += 1,
                EventKind::Other => counts.other += 1,
            }
            counts
        })
    }
}

/// What to report when a scaled estimate comes out as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fallback {
    /// Rounded share of the authoritative total.
    ShareOfTotal(f64),
    /// Accept zero.
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackRules {
    pub pull_requests: Fallback,
    pub issues: Fallback,
    pub reviews: Fallback,
}

impl Default for FallbackRules {
    // Reviews have no floor: a sample without reviews reports zero.
    fn default() -> Self {
        Self {
            pull_requests: Fallback::ShareOfTotal(0.05),
            issues: Fallback::ShareOfTotal(0.02),
            reviews: Fallback::Zero,
        }
    }
}

/// Scales one sampled count against the authoritative total.
///
/// `push_sample` is floored at 1. When the rounded estimate is zero the
/// fallback decides the result.
pub fn extrapolate(
    sample_count: u32,
    push_sample: u32,
    authoritative_total: u32,
    fallback: Fallback,
) -> u32 {
    let scale_factor = authoritative_total as f64 / push_sample.max(1) as f64;
    let estimate = round_count(sample_count as f64 * scale_factor);
    if estimate > 0 {
        return estimate;
    }

    match fallback {
        Fallback::ShareOfTotal(share) => round_count(authoritative_total as f64 * share),
        Fallback::Zero => 0,
    }
}

pub fn extrapolate_breakdown(
    sample: &SampleCounts,
    total_commits: u32,
    rules: &FallbackRules,
) -> ContributionBreakdown {
    ContributionBreakdown {
        commits: total_commits,
        pull_requests: extrapolate(
            sample.pull_requests,
            sample.pushes,
            total_commits,
            rules.pull_requests,
        ),
        issues: extrapolate(sample.issues, sample.pushes, total_commits, rules.issues),
        reviews: extrapolate(sample.reviews, sample.pushes, total_commits, rules.reviews),
    }
}

fn round_count(value: f64) -> u32 {
    // `as` saturates, so oversized estimates clamp to u32::MAX.
    value.round().max(0.0) as u32
}
