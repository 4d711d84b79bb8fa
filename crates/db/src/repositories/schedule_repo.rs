//! Read-only assembly of the per-date schedule.

use laundry_core::interval::DateInterval;
use laundry_core::schedule::build_schedule;
use sqlx::PgPool;

use super::{BookingRepo, SlotRepo};
use crate::models::booking::BookingSearch;
use crate::models::schedule::LaundrySchedule;

/// Loads the slot catalog and the bookings for an interval and joins them.
pub struct ScheduleRepo;

impl ScheduleRepo {
    /// Build the schedule for every date in `interval`.
    ///
    /// The catalog and the bookings are each fetched once, regardless of the
    /// number of days covered.
    pub async fn build(
        pool: &PgPool,
        interval: &DateInterval,
    ) -> Result<LaundrySchedule, sqlx::Error> {
        let slots = SlotRepo::list_with_machines(pool).await?;
        let bookings = BookingRepo::search(pool, &BookingSearch::interval(interval)).await?;

        tracing::debug!(
            start = %interval.start(),
            end = %interval.end(),
            slots = slots.len(),
            bookings = bookings.len(),
            "Assembling schedule",
        );

        Ok(build_schedule(interval, &slots, &bookings))
    }
}
