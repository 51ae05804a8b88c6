//! Civil date and time primitives shared across the scheduling core.
//!
//! Appointments, working hours, and planning grids all operate on naive
//! (timezone-free) dates and times. The salon's timezone only matters at
//! the boundary where "now" and "today" are resolved, and [`SalonCalendar`]
//! owns that boundary. Everything else in this module is pure arithmetic
//! on `chrono` civil types, so it stays trivial to test.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

// ============================================================================
// Keys and formatting
// ============================================================================

/// Formats a date as its canonical `YYYY-MM-DD` key.
///
/// Date keys are how absences, requests, and appointments refer to days in
/// serialized form; lexicographic order on keys matches chronological order.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a `YYYY-MM-DD` key back into a date.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()
}

/// Formats a time of day as `HH:MM`, dropping seconds.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Parses an `HH:MM` string into a time of day.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Minutes elapsed since midnight. Seconds are truncated.
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Numeric weekday with Sunday as 0, matching the serialized form used for
/// per-staff closed days.
pub fn weekday_index(day: Weekday) -> u8 {
    day.num_days_from_sunday() as u8
}

/// Inverse of [`weekday_index`].
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// Every date from `start` through `end`, inclusive on both sides.
///
/// A reversed range yields an empty vector; callers that treat reversal as
/// an error validate before expanding.
pub fn expand_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// Number of calendar days covered by an inclusive range. A single-day
/// range counts as 1.
pub fn day_count_inclusive(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

// ============================================================================
// Time windows
// ============================================================================

/// A half-open interval of the day, `[start, end)`.
///
/// Working hours, break windows, and the salon's opening hours are all
/// expressed as time windows. The end minute itself is outside the window,
/// so back-to-back windows never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Builds a window from `HH:MM` strings, `None` if either fails to parse.
    pub fn from_hhmm(start: &str, end: &str) -> Option<Self> {
        Some(Self {
            start: parse_hhmm(start)?,
            end: parse_hhmm(end)?,
        })
    }

    /// True when the window covers a positive span of the day.
    pub fn is_ordered(&self) -> bool {
        self.start < self.end
    }

    pub fn start_minute(&self) -> u32 {
        minute_of_day(self.start)
    }

    pub fn end_minute(&self) -> u32 {
        minute_of_day(self.end)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_minute().saturating_sub(self.start_minute())
    }

    /// Whether a given minute of the day falls inside the window.
    pub fn contains_minute(&self, minute: u32) -> bool {
        self.start_minute() <= minute && minute < self.end_minute()
    }

    /// Whether the half-open minute range `[start, end)` intersects this
    /// window. Touching endpoints do not count as overlap.
    pub fn overlaps_minutes(&self, start: u32, end: u32) -> bool {
        start < self.end_minute() && end > self.start_minute()
    }

    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        self.overlaps_minutes(other.start_minute(), other.end_minute())
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", format_hhmm(self.start), format_hhmm(self.end))
    }
}

// ============================================================================
// Serde helpers
// ============================================================================

/// Serializes a `NaiveTime` as an `HH:MM` string.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        super::parse_hhmm(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid HH:MM time: {value}")))
    }
}

/// Serializes a `HashSet<Weekday>` as a sorted list of integers with
/// Sunday as 0. Sorting keeps the serialized form deterministic.
pub mod weekday_nums {
    use std::collections::HashSet;

    use chrono::Weekday;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(days: &HashSet<Weekday>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut nums: Vec<u8> = days.iter().map(|d| super::weekday_index(*d)).collect();
        nums.sort_unstable();
        let mut seq = serializer.serialize_seq(Some(nums.len()))?;
        for num in nums {
            seq.serialize_element(&num)?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<HashSet<Weekday>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nums = Vec::<u8>::deserialize(deserializer)?;
        nums.into_iter()
            .map(|n| {
                super::weekday_from_index(n)
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid weekday index: {n}")))
            })
            .collect()
    }
}

// ============================================================================
// Salon calendar
// ============================================================================

/// Resolves "now" and "today" in the salon's local timezone.
///
/// The rest of the crate takes civil datetimes as explicit arguments, which
/// keeps the scheduling logic deterministic under test. `SalonCalendar` is
/// the one place a caller asks for the current wall clock.
#[derive(Debug, Clone, Copy)]
pub struct SalonCalendar {
    tz: Tz,
}

impl SalonCalendar {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Today's date on the salon's wall clock.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.tz).date_naive()
    }

    /// The current civil datetime on the salon's wall clock, suitable for
    /// passing as the `now` argument of availability queries.
    pub fn now_civil(&self) -> chrono::NaiveDateTime {
        Utc::now().with_timezone(&self.tz).naive_local()
    }

    /// Anchors a civil date and time to an absolute instant.
    ///
    /// Ambiguous wall-clock times (the repeated hour at DST fall-back) and
    /// skipped ones (the spring-forward gap) both resolve to the later
    /// valid instant.
    pub fn instant(&self, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Tz>> {
        self.tz.from_local_datetime(&date.and_time(time)).latest()
    }

    /// Unix milliseconds for a civil date and time, `None` only for wall
    /// clocks that never occur in this timezone.
    pub fn timestamp_millis(&self, date: NaiveDate, time: NaiveTime) -> Option<i64> {
        self.instant(date, time).map(|dt| dt.timestamp_millis())
    }
}
