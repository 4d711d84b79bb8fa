//! Time-of-day parsing and formatting for slot boundaries.
//!
//! Slots are written as `"HH:MM"` (seconds optional) and always rendered as
//! `"HH:MM"` unless they carry non-zero seconds.

use chrono::{NaiveTime, Timelike};
use serde::Serializer;

use crate::error::CoreError;
use crate::types::TimeOfDay;

const SHORT_FORMAT: &str = "%H:%M";
const LONG_FORMAT: &str = "%H:%M:%S";

/// Parse `"HH:MM"` or `"HH:MM:SS"`.
pub fn parse_time(field: &str, value: &str) -> Result<TimeOfDay, CoreError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, SHORT_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, LONG_FORMAT))
        .map_err(|_| {
            CoreError::Validation(format!("{field} '{value}' is not a valid time of day"))
        })
}

/// Render a time the way it is accepted on input.
pub fn format_time(time: &TimeOfDay) -> String {
    if time.second() == 0 {
        time.format(SHORT_FORMAT).to_string()
    } else {
        time.format(LONG_FORMAT).to_string()
    }
}

/// `serialize_with` helper for [`TimeOfDay`] fields.
pub fn serialize<S: Serializer>(time: &TimeOfDay, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_time(time))
}
