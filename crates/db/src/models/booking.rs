//! Booking entity model, DTOs and the denormalized booking record.

use std::collections::HashMap;

use laundry_core::error::CoreError;
use laundry_core::interval::{parse_date_field, DateInterval};
use laundry_core::schedule::ScheduledBooking;
use laundry_core::time_of_day;
use laundry_core::types::{Date, DbId, TimeOfDay, Timestamp};
use laundry_core::validation::require;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::booker::BookerSnapshot;
use super::machine::Machine;

/// A row from the `bookings` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub book_date: Date,
    pub slot_id: DbId,
    pub booker_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a booking. Every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBooking {
    pub book_date: Option<String>,
    pub slot_id: Option<DbId>,
    pub booker_id: Option<DbId>,
}

/// Validated booking fields, ready to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewBooking {
    pub book_date: Date,
    pub slot_id: DbId,
    pub booker_id: DbId,
}

impl TryFrom<&CreateBooking> for NewBooking {
    type Error = CoreError;

    fn try_from(input: &CreateBooking) -> Result<Self, Self::Error> {
        let raw_date = require(input.book_date.as_deref(), "book_date")?;
        Ok(Self {
            book_date: parse_date_field("book_date", raw_date)?,
            slot_id: require(input.slot_id, "slot_id")?,
            booker_id: require(input.booker_id, "booker_id")?,
        })
    }
}

/// Filter for [`crate::repositories::BookingRepo::search`].
///
/// Both date bounds are inclusive; `None` leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingSearch {
    pub from: Option<Date>,
    pub to: Option<Date>,
    pub booker_id: Option<DbId>,
}

impl BookingSearch {
    /// Every booking inside `interval`.
    pub fn interval(interval: &DateInterval) -> Self {
        Self {
            from: Some(interval.start()),
            to: Some(interval.end()),
            booker_id: None,
        }
    }

    /// Bookings of one booker from `today` onwards.
    pub fn upcoming(booker_id: DbId, today: Date) -> Self {
        Self {
            from: Some(today),
            to: None,
            booker_id: Some(booker_id),
        }
    }

    /// Restrict the search to a single booker.
    pub fn with_booker(mut self, booker_id: Option<DbId>) -> Self {
        self.booker_id = booker_id;
        self
    }
}

/// The slot fields carried by a [`BookingRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSummary {
    pub id: DbId,
    pub weekday: i16,
    #[serde(serialize_with = "time_of_day::serialize")]
    pub start: TimeOfDay,
    #[serde(serialize_with = "time_of_day::serialize")]
    pub end: TimeOfDay,
}

/// A booking joined with its slot, booker and the slot's machines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRecord {
    pub id: DbId,
    pub date: Date,
    pub slot: SlotSummary,
    pub booker: BookerSnapshot,
    pub machines: Vec<Machine>,
}

impl ScheduledBooking for BookingRecord {
    type Booker = BookerSnapshot;

    fn booking_id(&self) -> DbId {
        self.id
    }

    fn book_date(&self) -> Date {
        self.date
    }

    fn slot_id(&self) -> DbId {
        self.slot.id
    }

    fn booker(&self) -> &BookerSnapshot {
        &self.booker
    }
}

/// One row of the booking search join: a booking paired with at most one of
/// its slot's machines. Machine columns are `NULL` when the slot has none.
#[derive(Debug, Clone, FromRow)]
pub struct BookingJoinRow {
    pub booking_id: DbId,
    pub book_date: Date,
    pub slot_id: DbId,
    pub weekday: i16,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub booker_id: DbId,
    pub identifier: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub machine_id: Option<DbId>,
    pub machine_info: Option<String>,
    pub machine_working: Option<bool>,
    pub machine_created_at: Option<Timestamp>,
    pub machine_updated_at: Option<Timestamp>,
}

impl BookingJoinRow {
    fn machine(&self) -> Option<Machine> {
        Some(Machine {
            id: self.machine_id?,
            info: self.machine_info.clone()?,
            working: self.machine_working?,
            created_at: self.machine_created_at?,
            updated_at: self.machine_updated_at?,
        })
    }

    fn record(&self) -> BookingRecord {
        BookingRecord {
            id: self.booking_id,
            date: self.book_date,
            slot: SlotSummary {
                id: self.slot_id,
                weekday: self.weekday,
                start: self.start_time,
                end: self.end_time,
            },
            booker: BookerSnapshot {
                id: self.booker_id,
                identifier: self.identifier.clone(),
                name: self.name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
            },
            machines: Vec::new(),
        }
    }
}

/// Fold join rows into one record per booking id.
///
/// Records keep the order in which their booking first appears; machines
/// keep row order.
pub fn fold_booking_rows(rows: &[BookingJoinRow]) -> Vec<BookingRecord> {
    let mut records: Vec<BookingRecord> = Vec::new();
    let mut positions: HashMap<DbId, usize> = HashMap::new();

    for row in rows {
        let position = *positions.entry(row.booking_id).or_insert_with(|| {
            records.push(row.record());
            records.len() - 1
        });

        if let Some(machine) = row.machine() {
            records[position].machines.push(machine);
        }
    }

    records
}
