//! Parsing of incident publication timestamps.
//!
//! The dataset has been exported in several date layouts over the years.
//! Parsing tries each known layout in turn; offsets are kept as written, so
//! the hour reported is the wall-clock hour in the string.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Layouts carrying a UTC offset.
const OFFSET_FORMATS: &[&str] = &[
    "%m/%d/%Y %I:%M:%S %p %z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
];

/// Layouts without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M",
];

/// Date-only layouts, read as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a publication timestamp into its local wall-clock date-time.
///
/// # Examples
///
/// ```
/// use atxtraffic::compute::temporal::parse_timestamp;
/// use chrono::Timelike;
///
/// let ts = parse_timestamp("2024-01-10 08:15:00").unwrap();
/// assert_eq!(ts.hour(), 8);
///
/// let ts = parse_timestamp("06/13/2018 06:35:59 PM +0000").unwrap();
/// assert_eq!(ts.hour(), 18);
///
/// assert!(parse_timestamp("not a date").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.naive_local());
        }
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Hour (0-23) and calendar year of a timestamp string.
#[inline]
pub fn hour_and_year(raw: &str) -> Option<(u32, i32)> {
    parse_timestamp(raw).map(|dt| (dt.hour(), dt.year()))
}
