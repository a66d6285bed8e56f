//! Tolerant date/time parsing.
//!
//! Meeting records arrive with inconsistent encodings: sometimes a combined
//! ISO datetime, sometimes a date field and a time field. Everything here
//! returns `None` for malformed input instead of guessing. Substituting
//! "now" for a missing value is a caller decision, never made here.
//!
//! Instants are `NaiveDateTime` values in the viewer's wall-clock frame;
//! timezone conversion happens before data reaches this crate.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

const TIME_FORMATS: [&str; 3] = ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"];

const INSTANT_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Combine a date string and a time string into one instant.
///
/// - `date_part`: `YYYY-MM-DD`, or an ISO datetime whose time portion is discarded
/// - `time_part`: `HH:MM` or `HH:MM:SS`
///
/// Returns `None` if either component is malformed.
pub fn parse_date_time(date_part: &str, time_part: &str) -> Option<NaiveDateTime> {
    let date = parse_date(date_part)?;
    let time = parse_time(time_part)?;
    Some(date.and_time(time))
}

/// Parse the calendar date out of a bare date or an ISO datetime.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let day = s.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Parse `HH:MM` or `HH:MM:SS`.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

/// Parse a single combined datetime string.
///
/// RFC 3339 values keep their wall-clock portion; the offset is dropped
/// because inputs are expected to be localized already.
pub fn parse_instant(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    INSTANT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Minutes from the start of `day` to `instant`.
///
/// Not bounded to a single day: an instant on the next day yields a value
/// past 1440, one on the previous day a negative value.
pub fn minutes_since_midnight(instant: NaiveDateTime, day: NaiveDate) -> i64 {
    (instant - day.and_time(NaiveTime::MIN)).num_minutes()
}

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
