//! Trailing-window daily histogram over report timestamps.
//!
//! The builder never reads the clock: the caller picks the anchor day and the
//! reference timezone, so the same inputs always give the same buckets.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Anything carrying an occurrence timestamp that can be bucketed by day.
pub trait TimestampedEvent {
    fn occurred_at(&self) -> &str;
}

impl TimestampedEvent for &str {
    fn occurred_at(&self) -> &str {
        self
    }
}

impl TimestampedEvent for String {
    fn occurred_at(&self) -> &str {
        self.as_str()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistogramError {
    #[error("window size must be at least one day, got {0}")]
    InvalidWindowSize(u32),
    #[error("a {window_days}-day window ending {anchor} starts before the earliest supported date")]
    WindowOutOfRange { anchor: NaiveDate, window_days: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBucket {
    pub date: NaiveDate,
    pub label: String,
    pub count: u64,
}

/// Parallel label/value arrays, the shape line-chart widgets take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub counts: Vec<u64>,
}

impl ChartSeries {
    pub fn from_buckets(buckets: &[DailyBucket]) -> Self {
        let (labels, counts) = buckets
            .iter()
            .map(|bucket| (bucket.label.clone(), bucket.count))
            .unzip();
        Self { labels, counts }
    }
}

/// Counts events per calendar day over the `window_days` days ending at
/// `anchor` (inclusive), oldest day first. Days without events are present
/// with a zero count.
///
/// Event dates are taken in `tz`. Events outside the window, or whose
/// timestamp cannot be parsed, are skipped.
pub fn build<E: TimestampedEvent>(
    anchor: NaiveDate,
    window_days: u32,
    tz: Tz,
    events: &[E],
) -> Result<Vec<DailyBucket>, HistogramError> {
    if window_days == 0 {
        return Err(HistogramError::InvalidWindowSize(window_days));
    }

    let start = anchor
        .checked_sub_days(Days::new(u64::from(window_days - 1)))
        .ok_or(HistogramError::WindowOutOfRange {
            anchor,
            window_days,
        })?;

    let mut counts = vec![0u64; window_days as usize];
    for event in events {
        let raw = event.occurred_at();
        let Some(date) = event_date(raw, tz) else {
            debug!("skipping event with unparsable timestamp {raw:?}");
            continue;
        };

        let offset = date.signed_duration_since(start).num_days();
        if let Some(slot) = usize::try_from(offset)
            .ok()
            .and_then(|index| counts.get_mut(index))
        {
            *slot = slot.saturating_add(1);
        }
    }

    Ok(start
        .iter_days()
        .zip(counts)
        .map(|(date, count)| DailyBucket {
            label: short_label(date),
            date,
            count,
        })
        .collect())
}

/// Calendar date of a timestamp in the reference timezone.
///
/// Offset-carrying timestamps are converted; offset-less ones are taken as
/// wall-clock time already in the reference timezone.
pub fn event_date(raw: &str, tz: Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&tz).date_naive());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|local| local.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

fn short_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;
    use chrono_tz::UTC;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn labelled(buckets: &[DailyBucket]) -> Vec<(&str, u64)> {
        buckets
            .iter()
            .map(|bucket| (bucket.label.as_str(), bucket.count))
            .collect()
    }

    #[test]
    fn buckets_three_day_window() {
        let events = [
            "2024-03-09T05:00:00Z",
            "2024-03-09T23:00:00Z",
            "2024-03-08T00:00:00Z",
            "2024-03-05T00:00:00Z",
        ];

        let buckets = build(day(2024, 3, 10), 3, UTC, &events).unwrap();
        assert_eq!(labelled(&buckets), vec![("3/8", 1), ("3/9", 2), ("3/10", 0)]);
    }

    #[test]
    fn window_has_exactly_n_consecutive_days() {
        let none: [&str; 0] = [];
        for window in [1u32, 2, 7, 30, 365] {
            let anchor = day(2024, 2, 29);
            let buckets = build(anchor, window, UTC, &none).unwrap();
            assert_eq!(buckets.len(), window as usize);
            assert_eq!(buckets.last().unwrap().date, anchor);
            for pair in buckets.windows(2) {
                assert_eq!(pair[1].date.signed_duration_since(pair[0].date).num_days(), 1);
            }
            assert!(buckets.iter().all(|bucket| bucket.count == 0));
        }
    }

    #[test]
    fn dst_transition_neither_skips_nor_repeats_days() {
        let none: [&str; 0] = [];
        let buckets = build(day(2024, 11, 5), 10, New_York, &none).unwrap();
        let labels: Vec<&str> = buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "10/27", "10/28", "10/29", "10/30", "10/31", "11/1", "11/2", "11/3", "11/4",
                "11/5"
            ]
        );

        let spring = build(day(2024, 3, 12), 4, New_York, &none).unwrap();
        let labels: Vec<&str> = spring.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["3/9", "3/10", "3/11", "3/12"]);
    }

    #[test]
    fn offset_timestamps_are_bucketed_in_reference_timezone() {
        // 01:30 EST and 23:30 EDT, both on 3/10 in New York.
        let events = ["2024-03-10T06:30:00Z", "2024-03-11T03:30:00Z"];

        let local = build(day(2024, 3, 11), 2, New_York, &events).unwrap();
        assert_eq!(labelled(&local), vec![("3/10", 2), ("3/11", 0)]);

        let utc = build(day(2024, 3, 11), 2, UTC, &events).unwrap();
        assert_eq!(labelled(&utc), vec![("3/10", 1), ("3/11", 1)]);
    }

    #[test]
    fn anchor_day_event_hits_last_bucket() {
        let events = ["2024-06-30T12:00:00Z"];
        let buckets = build(day(2024, 6, 30), 30, UTC, &events).unwrap();
        assert_eq!(buckets.last().unwrap().count, 1);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<u64>(), 1);
    }

    #[test]
    fn first_bucket_is_inclusive_and_one_day_earlier_is_dropped() {
        let anchor = day(2024, 6, 30);
        let first = ["2024-06-01T08:00:00Z"];
        let buckets = build(anchor, 30, UTC, &first).unwrap();
        assert_eq!(buckets[0].date, day(2024, 6, 1));
        assert_eq!(buckets[0].count, 1);

        let earlier = ["2024-05-31T23:59:59Z"];
        let buckets = build(anchor, 30, UTC, &earlier).unwrap();
        assert!(buckets.iter().all(|b| b.count == 0));
    }

    #[test]
    fn future_and_malformed_events_are_skipped() {
        let events = [
            "not a timestamp",
            "",
            "2024-13-40T00:00:00Z",
            "2024-07-01T00:00:00Z",
            "2024-06-29T10:00:00+02:00",
        ];
        let buckets = build(day(2024, 6, 30), 3, UTC, &events).unwrap();
        assert_eq!(labelled(&buckets), vec![("6/28", 0), ("6/29", 1), ("6/30", 0)]);
    }

    #[test]
    fn duplicates_count_independently() {
        let events = vec!["2024-01-02T00:00:00Z".to_string(); 4];
        let buckets = build(day(2024, 1, 2), 1, UTC, &events).unwrap();
        assert_eq!(buckets[0].count, 4);
    }

    #[test]
    fn offsetless_timestamps_use_their_wall_clock_date() {
        let events = ["2024-01-01T23:30:00", "2024-01-02 00:10:00.250", "2024-01-02"];
        let buckets = build(day(2024, 1, 2), 2, New_York, &events).unwrap();
        assert_eq!(labelled(&buckets), vec![("1/1", 1), ("1/2", 2)]);
    }

    #[test]
    fn zero_window_is_rejected() {
        let none: [&str; 0] = [];
        assert_eq!(
            build(day(2024, 1, 1), 0, UTC, &none),
            Err(HistogramError::InvalidWindowSize(0))
        );
    }

    #[test]
    fn window_before_earliest_date_is_rejected() {
        let none: [&str; 0] = [];
        let result = build(NaiveDate::MIN, 2, UTC, &none);
        assert!(matches!(result, Err(HistogramError::WindowOutOfRange { .. })));
    }

    #[test]
    fn repeated_builds_are_identical() {
        let events = ["2024-03-09T05:00:00Z", "2024-03-10T01:00:00-05:00"];
        let first = build(day(2024, 3, 10), 30, New_York, &events).unwrap();
        let second = build(day(2024, 3, 10), 30, New_York, &events).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn chart_series_keeps_bucket_order() {
        let events = ["2024-03-09T05:00:00Z"];
        let buckets = build(day(2024, 3, 10), 2, UTC, &events).unwrap();
        let series = ChartSeries::from_buckets(&buckets);
        assert_eq!(series.labels, vec!["3/9", "3/10"]);
        assert_eq!(series.counts, vec![1, 0]);
    }
}
