//! Daily time-window labels.
//!
//! Doctor profiles store the daily window as free text with a fixed
//! grammar: `"<hour> <AM|PM> - <hour> <AM|PM>"`. Anything outside that
//! grammar is a profile-layer configuration error; the parser fails
//! closed instead of guessing.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Window label parse errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowParseError {
    #[error("window label must be '<hour> <AM|PM> - <hour> <AM|PM>', got '{0}'")]
    BadFormat(String),

    #[error("hour out of range 1-12 in window label '{0}'")]
    BadHour(String),

    #[error("window end precedes start in label '{0}'")]
    EndBeforeStart(String),
}

/// A doctor's daily working window, parsed from a label like
/// `"11 AM - 4 PM"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeWindow {
    /// Opening hour, 24-hour clock
    pub start_hour: u32,
    /// Closing hour, 24-hour clock. Inclusive: booking exactly at the
    /// closing hour is allowed.
    pub end_hour: u32,
    /// Original label, kept for user-facing messages
    pub label: String,
}

impl TimeWindow {
    /// Parse a window label. 12 AM maps to hour 0, 12 PM stays 12,
    /// other PM hours add 12. Windows crossing midnight are rejected.
    pub fn parse(label: &str) -> Result<Self, WindowParseError> {
        let trimmed = label.trim();
        let mut halves = trimmed.splitn(2, '-');
        let start = halves
            .next()
            .ok_or_else(|| WindowParseError::BadFormat(trimmed.to_string()))?;
        let end = halves
            .next()
            .ok_or_else(|| WindowParseError::BadFormat(trimmed.to_string()))?;

        let start_hour = parse_half(start, trimmed)?;
        let end_hour = parse_half(end, trimmed)?;
        if end_hour < start_hour {
            return Err(WindowParseError::EndBeforeStart(trimmed.to_string()));
        }

        Ok(Self {
            start_hour,
            end_hour,
            label: trimmed.to_string(),
        })
    }

    /// Whether the moment's fractional hour of day falls inside the
    /// window. Both bounds are inclusive.
    pub fn contains(&self, moment_at: DateTime<Utc>) -> bool {
        let hour = moment_at.hour() as f64 + moment_at.minute() as f64 / 60.0;
        self.start_hour as f64 <= hour && hour <= self.end_hour as f64
    }
}

/// Parse one half of a label (`"11 AM"`) to a 24-hour clock hour.
fn parse_half(half: &str, label: &str) -> Result<u32, WindowParseError> {
    let mut tokens = half.split_whitespace();
    let hour: u32 = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| WindowParseError::BadFormat(label.to_string()))?;
    let meridiem = tokens
        .next()
        .ok_or_else(|| WindowParseError::BadFormat(label.to_string()))?;
    if tokens.next().is_some() {
        return Err(WindowParseError::BadFormat(label.to_string()));
    }
    if !(1..=12).contains(&hour) {
        return Err(WindowParseError::BadHour(label.to_string()));
    }

    match meridiem.to_ascii_lowercase().as_str() {
        "am" => Ok(if hour == 12 { 0 } else { hour }),
        "pm" => Ok(if hour == 12 { 12 } else { hour + 12 }),
        _ => Err(WindowParseError::BadFormat(label.to_string())),
    }
}
