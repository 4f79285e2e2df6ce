use chrono::{FixedOffset, Timelike};

use crate::models::{ActivityEvent, ProductivityProfile, TimeOfDay};

/// Peak hour reported when there are no events to look at.
pub const DEFAULT_PEAK_HOUR: u32 = 14;

/// Event counts per hour of day, after shifting timestamps into `offset`.
pub fn hourly_histogram(events: &[ActivityEvent], offset: &FixedOffset) -> [u32; 24] {
    let mut hours = [0u32; 24];
    for event in events {
        let hour = event.timestamp.with_timezone(offset).hour() as usize;
        hours[hour] += 1;
    }
    hours
}

/// Busiest hour of the sample, earliest hour on ties.
pub fn peak_hour(histogram: &[u32; 24]) -> Option<u32> {
    let mut peak: Option<usize> = None;
    for (hour, &count) in histogram.iter().enumerate() {
        if count == 0 {
            continue;
        }
        if peak.map_or(true, |p| count > histogram[p]) {
            peak = Some(hour);
        }
    }
    peak.map(|h| h as u32)
}

pub fn profile_productivity(events: &[ActivityEvent], offset: &FixedOffset) -> ProductivityProfile {
    let peak_hour = peak_hour(&hourly_histogram(events, offset)).unwrap_or(DEFAULT_PEAK_HOUR);
    ProductivityProfile {
        peak_hour,
        time_of_day: TimeOfDay::from_hour(peak_hour),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventKind;
    use chrono::{TimeZone, Utc};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn events_at(hours: &[u32]) -> Vec<ActivityEvent> {
        hours
            .iter()
            .map(|&h| ActivityEvent {
                kind: EventKind::Push,
                timestamp: Utc.with_ymd_and_hms(2025, 8, 14, h, 30, 0).unwrap(),
            })
            .collect()
    }

    #[test]
    fn test_empty_sample_defaults_to_afternoon() {
        let profile = profile_productivity(&[], &utc());
        assert_eq!(profile.peak_hour, 14);
        assert_eq!(profile.time_of_day, TimeOfDay::Afternoon);
    }

    #[test]
    fn test_peak_hour_picks_most_frequent() {
        let profile = profile_productivity(&events_at(&[9, 23, 23, 2, 23, 9]), &utc());
        assert_eq!(profile.peak_hour, 23);
        assert_eq!(profile.time_of_day, TimeOfDay::LateNight);
    }

    #[test]
    fn test_peak_hour_tie_prefers_earlier_hour() {
        let profile = profile_productivity(&events_at(&[18, 7, 18, 7]), &utc());
        assert_eq!(profile.peak_hour, 7);
        assert_eq!(profile.time_of_day, TimeOfDay::Morning);
    }

    #[test]
    fn test_offset_shifts_hours() {
        let offset = FixedOffset::east_opt(-5 * 3600).unwrap();
        let histogram = hourly_histogram(&events_at(&[3]), &offset);
        assert_eq!(histogram[22], 1);
        assert_eq!(histogram.iter().sum::<u32>(), 1);
    }

    #[test]
    fn test_noon_is_afternoon() {
        let profile = profile_productivity(&events_at(&[12]), &utc());
        assert_eq!(profile.time_of_day, TimeOfDay::Afternoon);
    }
}
