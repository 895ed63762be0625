//! Scheduled production items and the date-bucket filter.
//!
//! Bucketing is relative to a caller-supplied reference instant, never the
//! wall clock, so the classification is a pure function. Calendar-date
//! comparisons use the UTC calendar day.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Priority of a scheduled item.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    #[default]
    Normal,
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Normal => "normal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "normal" => Some(Self::Normal),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("item ends before it starts")]
    EndBeforeStart,
}

/// One entry on the production schedule. Immutable within a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduledItem {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub priority: Priority,
    pub participants: u32,
}

impl ScheduledItem {
    /// Build an item, rejecting `ends_at < starts_at`.
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
        priority: Priority,
        participants: u32,
    ) -> Result<Self, ScheduleError> {
        if ends_at < starts_at {
            return Err(ScheduleError::EndBeforeStart);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            title: title.into(),
            location: location.into(),
            starts_at,
            ends_at,
            priority,
            participants,
        })
    }
}

/// Day-window classification of an item relative to a reference instant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DayBucket {
    Today,
    Tomorrow,
    ThisWeek,
    Other,
}

impl DayBucket {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::ThisWeek => "week",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "today" => Some(Self::Today),
            "tomorrow" => Some(Self::Tomorrow),
            "week" | "this_week" => Some(Self::ThisWeek),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for DayBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True iff `start` falls on the same calendar date as `now`.
pub fn is_today(start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start.date_naive() == now.date_naive()
}

/// True iff `start` falls on the calendar date after `now`'s.
pub fn is_tomorrow(start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start.date_naive() == (now + Duration::days(1)).date_naive()
}

/// True iff `now <= start < now + 7 days`. Lower bound inclusive, upper
/// bound exclusive: an item starting exactly seven days out is excluded.
pub fn is_within_week(start: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start >= now && start < now + Duration::days(7)
}

/// Classify an item's start into exactly one bucket.
///
/// Today and Tomorrow take precedence over ThisWeek so the buckets partition
/// the week-bounded subset.
pub fn bucket_for(item: &ScheduledItem, now: DateTime<Utc>) -> DayBucket {
    if is_today(item.starts_at, now) {
        DayBucket::Today
    } else if is_tomorrow(item.starts_at, now) {
        DayBucket::Tomorrow
    } else if is_within_week(item.starts_at, now) {
        DayBucket::ThisWeek
    } else {
        DayBucket::Other
    }
}

/// Stable split into (current, upcoming): items starting today vs everything
/// later. Ties keep the original list order; no re-sort.
pub fn partition(
    items: &[ScheduledItem],
    now: DateTime<Utc>,
) -> (Vec<ScheduledItem>, Vec<ScheduledItem>) {
    let mut current = Vec::new();
    let mut upcoming = Vec::new();
    for item in items {
        if is_today(item.starts_at, now) {
            current.push(item.clone());
        } else if item.starts_at > now {
            upcoming.push(item.clone());
        }
    }
    (current, upcoming)
}

/// Filter items matching one bucket, preserving input order.
pub fn filter_bucket(
    items: &[ScheduledItem],
    bucket: DayBucket,
    now: DateTime<Utc>,
) -> Vec<ScheduledItem> {
    items
        .iter()
        .filter(|i| bucket_for(i, now) == bucket)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    fn item(starts_at: DateTime<Utc>) -> ScheduledItem {
        ScheduledItem::new(
            "Desert Chase Scene Filming",
            "Al Qudra Desert",
            starts_at,
            starts_at + Duration::hours(2),
            Priority::High,
            12,
        )
        .unwrap()
    }

    #[test]
    fn rejects_end_before_start() {
        let start = at(2024, 1, 10, 9, 0);
        let err = ScheduledItem::new("x", "y", start, start - Duration::hours(1), Priority::Normal, 1)
            .unwrap_err();
        assert_eq!(err, ScheduleError::EndBeforeStart);
    }

    #[test]
    fn same_calendar_day_late_evening_is_today_not_tomorrow() {
        let now = at(2024, 1, 10, 23, 0);
        let start = at(2024, 1, 10, 9, 0);
        assert!(is_today(start, now));
        assert!(!is_tomorrow(start, now));
    }

    #[test]
    fn next_calendar_day_is_tomorrow() {
        let now = at(2024, 1, 10, 23, 0);
        assert!(is_tomorrow(at(2024, 1, 11, 0, 30), now));
        assert!(!is_today(at(2024, 1, 11, 0, 30), now));
    }

    #[test]
    fn week_window_bounds() {
        let now = at(2024, 1, 10, 12, 0);
        // Inclusive lower bound.
        assert!(is_within_week(now, now));
        // Exclusive upper bound: exactly 7*24h out is excluded.
        assert!(!is_within_week(now + Duration::days(7), now));
        assert!(is_within_week(now + Duration::days(7) - Duration::seconds(1), now));
        // Past items are excluded.
        assert!(!is_within_week(now - Duration::seconds(1), now));
    }

    #[test]
    fn buckets_are_exclusive_and_exhaustive_over_the_week() {
        let now = at(2024, 1, 10, 12, 0);
        let starts = [
            now + Duration::hours(1),
            now + Duration::hours(20), // next calendar day
            now + Duration::days(3),
            now + Duration::days(10),
            now - Duration::days(2),
        ];
        for start in starts {
            let it = item(start);
            let bucket = bucket_for(&it, now);
            let hits = [
                is_today(start, now),
                is_tomorrow(start, now),
                is_within_week(start, now) && !is_today(start, now) && !is_tomorrow(start, now),
            ]
            .iter()
            .filter(|&&b| b)
            .count();
            match bucket {
                DayBucket::Other => assert_eq!(hits, 0, "start {start}"),
                _ => assert_eq!(hits, 1, "start {start} bucket {bucket}"),
            }
        }
    }

    #[test]
    fn seven_days_exactly_falls_out_of_the_week_bucket() {
        let now = at(2024, 1, 10, 12, 0);
        let it = item(now + Duration::days(7));
        assert_eq!(bucket_for(&it, now), DayBucket::Other);
    }

    #[test]
    fn partition_is_stable_and_keeps_input_order() {
        let now = at(2024, 1, 10, 8, 0);
        let items = vec![
            item(at(2024, 1, 10, 10, 30)),
            item(at(2024, 1, 10, 8, 0)),
            item(at(2024, 1, 12, 11, 0)),
            item(at(2024, 1, 10, 15, 30)),
        ];
        let (current, upcoming) = partition(&items, now);
        assert_eq!(current.len(), 3);
        assert_eq!(current[0].id, items[0].id);
        assert_eq!(current[1].id, items[1].id);
        assert_eq!(current[2].id, items[3].id);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, items[2].id);
    }

    #[test]
    fn filter_bucket_matches_bucket_for() {
        let now = at(2024, 1, 10, 8, 0);
        let items = vec![
            item(now + Duration::hours(2)),
            item(now + Duration::days(1)),
            item(now + Duration::days(4)),
        ];
        assert_eq!(filter_bucket(&items, DayBucket::Today, now).len(), 1);
        assert_eq!(filter_bucket(&items, DayBucket::Tomorrow, now).len(), 1);
        assert_eq!(filter_bucket(&items, DayBucket::ThisWeek, now).len(), 1);
        assert!(filter_bucket(&items, DayBucket::Other, now).is_empty());
    }
}
