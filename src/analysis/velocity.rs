use chrono::{Datelike, NaiveDate};
use std::borrow::Cow;

use crate::models::ActivityDay;

#[derive(Debug, Clone, PartialEq)]
pub struct VelocityReport {
    pub series: Vec<ActivityDay>,
    pub total_commits: u32,
    pub longest_streak: u32,
    /// Indexed 0 = Sunday .. 6 = Saturday.
    pub weekday_totals: [u32; 7],
    pub busiest_weekday: usize,
}

#[derive(Debug, Default)]
struct VelocityFold {
    total_commits: u32,
    current_streak: u32,
    longest_streak: u32,
    weekday_totals: [u32; 7],
    previous_date: Option<NaiveDate>,
}

impl VelocityFold {
    fn step(mut self, day: &ActivityDay) -> Self {
        self.total_commits = self.total_commits.saturating_add(day.commits);

        let weekday = day.date.weekday().num_days_from_sunday() as usize;
        self.weekday_totals[weekday] = self.weekday_totals[weekday].saturating_add(day.commits);

        // A missing date breaks the run just like an idle one.
        let follows_previous = self
            .previous_date
            .and_then(|prev| prev.succ_opt())
            .map_or(false, |next| next == day.date);
        if !follows_previous {
            self.current_streak = 0;
        }
        self.previous_date = Some(day.date);

        if day.is_active() {
            self.current_streak += 1;
            if self.current_streak > self.longest_streak {
                self.longest_streak = self.current_streak;
            }
        } else {
            self.current_streak = 0;
        }

        self
    }
}

/// Single pass over the calendar. Input is sorted by date first if needed.
pub fn analyze_velocity(days: &[ActivityDay]) -> VelocityReport {
    let series: Cow<'_, [ActivityDay]> = if days.windows(2).all(|w| w[0].date <= w[1].date) {
        Cow::Borrowed(days)
    } else {
        tracing::debug!("Calendar not in chronological order, sorting");
        let mut sorted = days.to_vec();
        sorted.sort_by_key(|d| d.date);
        Cow::Owned(sorted)
    };

    let fold = series
        .iter()
        .fold(VelocityFold::default(), |acc, day| acc.step(day));

    VelocityReport {
        busiest_weekday: busiest_weekday(&fold.weekday_totals),
        series: series.into_owned(),
        total_commits: fold.total_commits,
        longest_streak: fold.longest_streak,
        weekday_totals: fold.weekday_totals,
    }
}

/// Index of the largest bucket; the lowest index wins ties.
pub fn busiest_weekday(totals: &[u32; 7]) -> usize {
    let mut best = 0;
    for (index, &total) in totals.iter().enumerate().skip(1) {
        if total > totals[best] {
            best = index;
        }
    }
    best
}
