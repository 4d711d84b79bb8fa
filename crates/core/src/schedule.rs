//! Schedule assembly: project slot templates onto calendar days.
//!
//! Given the slot catalog and the bookings inside a [`DateInterval`], every
//! date in the interval maps to the slots whose weekday matches that date,
//! each carrying the booker that booked it (if any). Dates without matching
//! slots map to an empty list; no date in the interval is ever absent.
//!
//! Bookings are matched to slots by `(date, slot id)`. Should the store ever
//! hold more than one booking for the same key, the lowest booking id wins.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use serde::Serialize;

use crate::interval::DateInterval;
use crate::slot::weekday_index;
use crate::types::{Date, DbId};

/// A recurring weekly slot as seen by the assembler.
pub trait SlotTemplate {
    fn slot_id(&self) -> DbId;

    /// Weekday number, `0` = Monday.
    fn weekday(&self) -> i16;
}

/// A concrete booking as seen by the assembler.
pub trait ScheduledBooking {
    type Booker: Clone;

    fn booking_id(&self) -> DbId;
    fn book_date(&self) -> Date;
    fn slot_id(&self) -> DbId;
    fn booker(&self) -> &Self::Booker;
}

/// One slot on one date, with the booker if the slot is taken.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntry<S, B> {
    #[serde(flatten)]
    pub slot: S,
    pub booker: Option<B>,
}

impl<S, B> ScheduleEntry<S, B> {
    pub fn is_booked(&self) -> bool {
        self.booker.is_some()
    }
}

/// Per-date schedule, ordered by date. Serializes with `YYYY-MM-DD` keys.
pub type Schedule<S, B> = BTreeMap<Date, Vec<ScheduleEntry<S, B>>>;

/// Build the schedule for `interval`.
///
/// Slot order within a day follows the order of `slots`. Bookings outside the
/// interval are ignored.
pub fn build_schedule<S, R>(
    interval: &DateInterval,
    slots: &[S],
    bookings: &[R],
) -> Schedule<S, R::Booker>
where
    S: SlotTemplate + Clone,
    R: ScheduledBooking,
{
    let index = index_bookings(interval, bookings);

    interval
        .days()
        .map(|day| {
            let weekday = weekday_index(day.weekday());
            let entries = slots
                .iter()
                .filter(|slot| slot.weekday() == weekday)
                .map(|slot| ScheduleEntry {
                    booker: index
                        .get(&(day, slot.slot_id()))
                        .map(|booking| booking.booker().clone()),
                    slot: slot.clone(),
                })
                .collect();
            (day, entries)
        })
        .collect()
}

fn index_bookings<'a, R: ScheduledBooking>(
    interval: &DateInterval,
    bookings: &'a [R],
) -> HashMap<(Date, DbId), &'a R> {
    let mut index: HashMap<(Date, DbId), &R> = HashMap::with_capacity(bookings.len());

    for booking in bookings
        .iter()
        .filter(|b| interval.contains(b.book_date()))
    {
        index
            .entry((booking.book_date(), booking.slot_id()))
            .and_modify(|current| {
                if booking.booking_id() < current.booking_id() {
                    *current = booking;
                }
            })
            .or_insert(booking);
    }

    index
}
