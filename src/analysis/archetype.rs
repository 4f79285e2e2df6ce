//! Behavioral archetype.
//!
//! An ordered list of `(predicate, archetype)` rules; the first rule that
//! matches decides, and [`Archetype::Tinkerer`] is returned when none do.
//! Order and thresholds are part of the contract.

use crate::models::{
    Archetype, CommunityStats, ContributionBreakdown, ProductivityProfile, TimeOfDay,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchetypeSignals {
    pub breakdown: ContributionBreakdown,
    pub community: CommunityStats,
    pub total_commits: u32,
    pub productivity: ProductivityProfile,
    pub weekday_totals: [u32; 7],
}

impl ArchetypeSignals {
    fn activity_ratio(&self, count: u32) -> f64 {
        let total = self.breakdown.total_activity();
        if total == 0 {
            return 0.0;
        }
        count as f64 / total as f64
    }

    pub fn pr_ratio(&self) -> f64 {
        self.activity_ratio(self.breakdown.pull_requests)
    }

    pub fn review_ratio(&self) -> f64 {
        self.activity_ratio(self.breakdown.reviews)
    }

    pub fn issue_ratio(&self) -> f64 {
        self.activity_ratio(self.breakdown.issues)
    }

    /// Share of commits made on Sunday or Saturday.
    pub fn weekend_ratio(&self) -> f64 {
        if self.total_commits == 0 {
            return 0.0;
        }
        let weekend = self.weekday_totals[0] as u64 + self.weekday_totals[6] as u64;
        weekend as f64 / self.total_commits as f64
    }
}

pub struct ArchetypeRule {
    pub archetype: Archetype,
    pub matches: fn(&ArchetypeSignals) -> bool,
}

fn opens_many_pull_requests(s: &ArchetypeSignals) -> bool {
    s.pr_ratio() > 0.20 && s.breakdown.pull_requests > 20
}

fn reviews_a_lot(s: &ArchetypeSignals) -> bool {
    s.review_ratio() > 0.10 && s.breakdown.reviews > 10
}

fn codes_on_weekends(s: &ArchetypeSignals) -> bool {
    s.weekend_ratio() > 0.35 && s.total_commits > 50
}

fn codes_late_at_night(s: &ArchetypeSignals) -> bool {
    s.productivity.time_of_day == TimeOfDay::LateNight && s.total_commits > 50
}

fn codes_in_the_morning(s: &ArchetypeSignals) -> bool {
    s.productivity.time_of_day == TimeOfDay::Morning && s.total_commits > 50
}

fn massive_volume(s: &ArchetypeSignals) -> bool {
    s.total_commits > 1200
}

fn steady_volume(s: &ArchetypeSignals) -> bool {
    s.total_commits > 400
}

fn files_many_issues(s: &ArchetypeSignals) -> bool {
    s.issue_ratio() > 0.15
}

fn has_an_audience(s: &ArchetypeSignals) -> bool {
    s.community.followers > 500 || s.community.total_stars > 1000
}

pub const ARCHETYPE_RULES: &[ArchetypeRule] = &[
    ArchetypeRule {
        archetype: Archetype::PullRequestPro,
        matches: opens_many_pull_requests,
    },
    ArchetypeRule {
        archetype: Archetype::Reviewer,
        matches: reviews_a_lot,
    },
    ArchetypeRule {
        archetype: Archetype::WeekendWarrior,
        matches: codes_on_weekends,
    },
    ArchetypeRule {
        archetype: Archetype::NightOwl,
        matches: codes_late_at_night,
    },
    ArchetypeRule {
        archetype: Archetype::EarlyBird,
        matches: codes_in_the_morning,
    },
    ArchetypeRule {
        archetype: Archetype::GridPainter,
        matches: massive_volume,
    },
    ArchetypeRule {
        archetype: Archetype::Consistent,
        matches: steady_volume,
    },
    ArchetypeRule {
        archetype: Archetype::Planner,
        matches: files_many_issues,
    },
    ArchetypeRule {
        archetype: Archetype::CommunityStar,
        matches: has_an_audience,
    },
];

pub fn classify(signals: &ArchetypeSignals) -> Archetype {
    ARCHETYPE_RULES
        .iter()
        .find(|rule| (rule.matches)(signals))
        .map(|rule| rule.archetype)
        .unwrap_or(Archetype::Tinkerer)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Quiet afternoon account with no matching rule.
    fn baseline() -> ArchetypeSignals {
        ArchetypeSignals {
            breakdown: ContributionBreakdown {
                commits: 40,
                pull_requests: 2,
                issues: 1,
                reviews: 0,
            },
            community: CommunityStats::default(),
            total_commits: 40,
            productivity: ProductivityProfile {
                peak_hour: 14,
                time_of_day: TimeOfDay::Afternoon,
            },
            weekday_totals: [2, 8, 8, 8, 8, 4, 2],
        }
    }

    fn with_commits(mut s: ArchetypeSignals, total: u32) -> ArchetypeSignals {
        s.total_commits = total;
        s.breakdown.commits = total;
        s.weekday_totals = [0, total, 0, 0, 0, 0, 0];
        s
    }

    #[test]
    fn test_default_is_tinkerer() {
        assert_eq!(classify(&baseline()), Archetype::Tinkerer);
    }

    #[test]
    fn test_pull_request_pro_beats_grid_painter() {
        let mut s = with_commits(baseline(), 1300);
        s.breakdown = ContributionBreakdown {
            commits: 75,
            pull_requests: 25,
            issues: 0,
            reviews: 0,
        };
        assert!((s.pr_ratio() - 0.25).abs() < f64::EPSILON);
        assert!(massive_volume(&s));
        assert_eq!(classify(&s), Archetype::PullRequestPro);
    }

    #[test]
    fn test_pull_request_pro_needs_volume() {
        let mut s = baseline();
        s.breakdown = ContributionBreakdown {
            commits: 10,
            pull_requests: 20,
            issues: 0,
            reviews: 0,
        };
        assert_ne!(classify(&s), Archetype::PullRequestPro);
    }

    #[test]
    fn test_reviewer() {
        let mut s = baseline();
        s.breakdown = ContributionBreakdown {
            commits: 80,
            pull_requests: 5,
            issues: 0,
            reviews: 15,
        };
        assert_eq!(classify(&s), Archetype::Reviewer);
    }

    #[test]
    fn test_weekend_warrior() {
        let mut s = with_commits(baseline(), 100);
        s.weekday_totals = [20, 10, 10, 10, 10, 20, 20];
        assert_eq!(classify(&s), Archetype::WeekendWarrior);

        // Exactly 35% is not enough
        s.weekday_totals = [15, 13, 13, 13, 13, 13, 20];
        assert_ne!(classify(&s), Archetype::WeekendWarrior);
    }

    #[test]
    fn test_time_of_day_archetypes_need_fifty_commits() {
        let mut s = with_commits(baseline(), 51);
        s.productivity.time_of_day = TimeOfDay::LateNight;
        assert_eq!(classify(&s), Archetype::NightOwl);

        s.productivity.time_of_day = TimeOfDay::Morning;
        assert_eq!(classify(&s), Archetype::EarlyBird);

        let mut s = with_commits(baseline(), 50);
        s.productivity.time_of_day = TimeOfDay::LateNight;
        assert_eq!(classify(&s), Archetype::Tinkerer);
    }

    #[test]
    fn test_volume_archetypes() {
        assert_eq!(classify(&with_commits(baseline(), 1201)), Archetype::GridPainter);
        assert_eq!(classify(&with_commits(baseline(), 1200)), Archetype::Consistent);
        assert_eq!(classify(&with_commits(baseline(), 401)), Archetype::Consistent);
        assert_eq!(classify(&with_commits(baseline(), 400)), Archetype::Tinkerer);
    }

    #[test]
    fn test_planner() {
        let mut s = baseline();
        s.breakdown.issues = 10;
        assert!(s.issue_ratio() > 0.15);
        assert_eq!(classify(&s), Archetype::Planner);
    }

    #[test]
    fn test_community_star() {
        let mut s = baseline();
        s.community.followers = 501;
        assert_eq!(classify(&s), Archetype::CommunityStar);

        let mut s = baseline();
        s.community.total_stars = 1001;
        assert_eq!(classify(&s), Archetype::CommunityStar);
    }

    #[test]
    fn test_zero_activity_has_zero_ratios() {
        let mut s = with_commits(baseline(), 0);
        s.breakdown = ContributionBreakdown::default();
        assert_eq!(s.pr_ratio(), 0.0);
        assert_eq!(s.weekend_ratio(), 0.0);
        assert_eq!(classify(&s), Archetype::Tinkerer);
    }
}
