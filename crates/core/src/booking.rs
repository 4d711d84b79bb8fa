//! Rules a new booking must satisfy before it is stored.

use chrono::Datelike;

use crate::error::CoreError;
use crate::slot::{weekday_from_index, weekday_index};
use crate::types::{Date, DbId};

/// A booking date must fall on the weekday its slot recurs on.
pub fn check_booking_weekday(
    book_date: Date,
    slot_id: DbId,
    slot_weekday: i16,
) -> Result<(), CoreError> {
    if weekday_index(book_date.weekday()) == slot_weekday {
        return Ok(());
    }
    let slot_day = weekday_from_index(slot_weekday)?;
    Err(CoreError::Validation(format!(
        "book_date {book_date} is a {} but slot {slot_id} is on {slot_day}",
        book_date.weekday()
    )))
}

/// Enforce the per-booker cap on upcoming bookings.
///
/// `max` of `0` means unlimited. `upcoming` is the number the booker already
/// holds, so the new booking is allowed while `upcoming < max`.
pub fn check_booking_limit(booker_id: DbId, upcoming: i64, max: u32) -> Result<(), CoreError> {
    if max == 0 || upcoming < i64::from(max) {
        return Ok(());
    }
    Err(CoreError::Conflict(format!(
        "Booker {booker_id} already holds {upcoming} upcoming bookings (maximum {max})"
    )))
}
