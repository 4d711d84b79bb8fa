//! Slot template rules: weekday numbering and start/end validation.
//!
//! Weekdays are numbered `0` (Monday) through `6` (Sunday), matching
//! `chrono::Weekday::num_days_from_monday`.

use chrono::Weekday;

use crate::error::CoreError;
use crate::time_of_day::{format_time, parse_time};
use crate::types::TimeOfDay;

/// Lowest valid weekday number (Monday).
pub const WEEKDAY_MIN: i16 = 0;

/// Highest valid weekday number (Sunday).
pub const WEEKDAY_MAX: i16 = 6;

/// A validated slot window, ready to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotWindow {
    pub weekday: i16,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

/// Map a stored weekday number to a [`Weekday`].
pub fn weekday_from_index(index: i16) -> Result<Weekday, CoreError> {
    let weekday = match index {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        6 => Weekday::Sun,
        _ => {
            return Err(CoreError::Validation(format!(
                "Invalid weekday {index}, must be between {WEEKDAY_MIN} and {WEEKDAY_MAX}"
            )))
        }
    };
    Ok(weekday)
}

/// Inverse of [`weekday_from_index`].
pub fn weekday_index(weekday: Weekday) -> i16 {
    weekday.num_days_from_monday() as i16
}

/// Validate a slot payload.
///
/// `min_duration_minutes` of `0` disables the duration check.
pub fn validate_slot(
    weekday: i16,
    start: &str,
    end: &str,
    min_duration_minutes: u32,
) -> Result<SlotWindow, CoreError> {
    weekday_from_index(weekday)?;

    let start = parse_time("start", start)?;
    let end = parse_time("end", end)?;

    if start >= end {
        return Err(CoreError::Validation(format!(
            "Slot start {} must be before end {}",
            format_time(&start),
            format_time(&end)
        )));
    }

    let minutes = (end - start).num_minutes();
    if minutes < i64::from(min_duration_minutes) {
        return Err(CoreError::Validation(format!(
            "Slot is {minutes} minutes long, minimum is {min_duration_minutes}"
        )));
    }

    Ok(SlotWindow {
        weekday,
        start,
        end,
    })
}
