//! Absolute-moment handling.
//!
//! A "moment" is the single UTC timestamp formed by merging a calendar
//! date with a time of day. The weekday token and display label stored
//! on an appointment are projections of its moment and are always
//! recomputed here, never accepted from callers.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc, Weekday};
use thiserror::Error;

/// Moment parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MomentError {
    #[error("invalid date: {0}")]
    InvalidDate(String),

    #[error("invalid time: {0}")]
    InvalidTime(String),

    #[error("invalid date-time: {0}")]
    InvalidMoment(String),
}

/// Combine a calendar date (`"2026-08-31"`) and a time of day
/// (`"10:00"`) into one UTC moment with zero seconds.
pub fn combine(date: &str, time: &str) -> Result<DateTime<Utc>, MomentError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| MomentError::InvalidDate(date.trim().to_string()))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .map_err(|_| MomentError::InvalidTime(time.trim().to_string()))?;
    Ok(Utc.from_utc_datetime(&date.and_time(time)))
}

/// Parse a moment supplied as one combined value. Reschedule callers
/// send either RFC 3339 or a bare `"YYYY-MM-DD HH:MM"` pair.
pub fn parse_moment(value: &str) -> Result<DateTime<Utc>, MomentError> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    Err(MomentError::InvalidMoment(value.to_string()))
}

/// Lowercase long-form weekday token for a moment. Fixed seven-token
/// mapping, independent of any runtime locale.
pub fn weekday_token(moment_at: DateTime<Utc>) -> &'static str {
    match moment_at.weekday() {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// Display label for a moment's time of day, e.g. `"10:00 AM"`.
pub fn time_label(moment_at: DateTime<Utc>) -> String {
    moment_at.format("%I:%M %p").to_string()
}

/// Fixed-width UTC encoding for timestamp columns
/// (`"2026-08-31T10:00:00Z"`). Lexicographic order on the encoded text
/// matches chronological order, which the repository's range scans
/// rely on.
pub fn to_storage(moment_at: DateTime<Utc>) -> String {
    moment_at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Decode a timestamp column written by [`to_storage`].
pub fn from_storage(value: &str) -> Result<DateTime<Utc>, MomentError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| MomentError::InvalidMoment(value.to_string()))
}
