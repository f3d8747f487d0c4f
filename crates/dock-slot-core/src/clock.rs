// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Wall-Clock Bridge
//!
//! The scheduling model is single-day and clock-time only, so timestamps are
//! handled as naive wall-clock values: an offset in the input is accepted
//! but dropped, keeping the local time the operator wrote. An [`Instant`] is
//! the number of whole seconds between the Unix epoch and that wall-clock
//! value; sub-second precision is truncated.

use crate::time::{TimeDelta, TimePoint};
use chrono::{DateTime, NaiveDateTime};
use std::fmt::Display;

pub type Instant = TimePoint<i64>;
pub type Span = TimeDelta<i64>;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimestampParseError {
    value: String,
}

impl TimestampParseError {
    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for TimestampParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a recognised timestamp", self.value)
    }
}

impl std::error::Error for TimestampParseError {}

#[inline]
pub fn seconds(s: i64) -> Span {
    TimeDelta::new(s)
}

#[inline]
pub fn minutes(m: i64) -> Span {
    TimeDelta::new(m.saturating_mul(60))
}

#[inline]
pub fn hours(h: i64) -> Span {
    TimeDelta::new(h.saturating_mul(3600))
}

#[inline]
pub fn from_naive(dt: NaiveDateTime) -> Instant {
    TimePoint::new(dt.and_utc().timestamp())
}

/// Converts back to a wall-clock value, `None` if out of chrono's range.
#[inline]
pub fn to_naive(t: Instant) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(t.value(), 0).map(|dt| dt.naive_utc())
}

/// Parses an RFC 3339 timestamp or one of the offset-less layouts in
/// `NAIVE_FORMATS`.
///
/// ```
/// use dock_slot_core::clock::{format_clock, parse_timestamp};
///
/// let a = parse_timestamp("2024-01-01T10:00:00").unwrap();
/// let b = parse_timestamp("2024-01-01T10:00:00+02:00").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(format_clock(a), "10:00:00");
/// ```
pub fn parse_timestamp(raw: &str) -> Result<Instant, TimestampParseError> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(from_naive(dt.naive_local()));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(from_naive)
        .ok_or_else(|| TimestampParseError::new(raw))
}

/// `HH:MM:SS` of the instant.
pub fn format_clock(t: Instant) -> String {
    to_naive(t).map_or_else(
        || format!("{}s", t.value()),
        |dt| dt.format("%H:%M:%S").to_string(),
    )
}

/// `YYYY-MM-DDTHH:MM:SS` of the instant.
pub fn format_timestamp(t: Instant) -> String {
    to_naive(t).map_or_else(
        || format!("{}s", t.value()),
        |dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_helpers() {
        assert_eq!(seconds(7).value(), 7);
        assert_eq!(minutes(30).value(), 1800);
        assert_eq!(hours(3).value(), 10_800);
    }

    #[test]
    fn test_parse_accepts_supported_layouts() {
        let base = parse_timestamp("2024-01-01T10:00:00").unwrap();
        assert_eq!(parse_timestamp("2024-01-01T10:00").unwrap(), base);
        assert_eq!(parse_timestamp("2024-01-01 10:00:00").unwrap(), base);
        assert_eq!(parse_timestamp("2024-01-01T10:00:00.750").unwrap(), base);
        assert_eq!(parse_timestamp("2024-01-01T10:00:00Z").unwrap(), base);
        assert_eq!(parse_timestamp(" 2024-01-01T10:00:00-05:00 ").unwrap(), base);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("tomorrow-ish").unwrap_err();
        assert_eq!(err.value(), "tomorrow-ish");
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2024-13-01T10:00:00").is_err());
    }

    #[test]
    fn test_seconds_resolution() {
        let a = parse_timestamp("2024-01-01T10:29:59").unwrap();
        let b = parse_timestamp("2024-01-01T10:30:00").unwrap();
        assert_eq!(b - a, seconds(1));
    }

    #[test]
    fn test_round_trip_formatting() {
        let t = parse_timestamp("2024-03-05T07:08:09").unwrap();
        assert_eq!(format_clock(t), "07:08:09");
        assert_eq!(format_timestamp(t), "2024-03-05T07:08:09");
        assert_eq!(to_naive(t).map(from_naive), Some(t));
    }
}
