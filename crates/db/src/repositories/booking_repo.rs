//! Repository for the `bookings` table.

use laundry_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::booking::{
    fold_booking_rows, Booking, BookingJoinRow, BookingRecord, BookingSearch, NewBooking,
};

/// Column list for the `bookings` table.
const COLUMNS: &str = "id, book_date, slot_id, booker_id, created_at";

/// Select list and joins shared by every denormalized booking read.
///
/// Machines are LEFT JOINed so a booking on a slot without machines still
/// yields exactly one row.
const RECORD_SELECT: &str = "\
    SELECT b.id AS booking_id, b.book_date, \
           s.id AS slot_id, s.weekday, s.start_time, s.end_time, \
           bk.id AS booker_id, bk.identifier, bk.name, bk.email, bk.phone, \
           m.id AS machine_id, m.info AS machine_info, m.working AS machine_working, \
           m.created_at AS machine_created_at, m.updated_at AS machine_updated_at \
    FROM bookings b \
    JOIN slots s ON s.id = b.slot_id \
    JOIN bookers bk ON bk.id = b.booker_id \
    LEFT JOIN slots_machines sm ON sm.slot_id = s.id \
    LEFT JOIN machines m ON m.id = sm.machine_id";

/// Result order for booking reads.
const RECORD_ORDER: &str = "ORDER BY b.book_date, s.start_time, b.id, m.id";

/// Provides CRUD and search operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a new booking, returning the created row.
    ///
    /// A second booking of the same slot on the same date violates
    /// `uq_bookings_slot_date`.
    pub async fn create(pool: &PgPool, input: &NewBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (book_date, slot_id, booker_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.book_date)
            .bind(input.slot_id)
            .bind(input.booker_id)
            .fetch_one(pool)
            .await
    }

    /// Find a booking row by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a booking by ID, joined with its slot, booker and machines.
    pub async fn find_record_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BookingRecord>, sqlx::Error> {
        let query = format!("{RECORD_SELECT} WHERE b.id = $1 {RECORD_ORDER}");
        let rows = sqlx::query_as::<_, BookingJoinRow>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;
        Ok(fold_booking_rows(&rows).into_iter().next())
    }

    /// Delete a booking by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Search bookings, one record per booking.
    ///
    /// Records are ordered by date, then slot start time, then booking ID.
    pub async fn search(
        pool: &PgPool,
        search: &BookingSearch,
    ) -> Result<Vec<BookingRecord>, sqlx::Error> {
        let query = format!(
            "{RECORD_SELECT} \
             WHERE ($1::DATE IS NULL OR b.book_date >= $1) \
               AND ($2::DATE IS NULL OR b.book_date <= $2) \
               AND ($3::BIGINT IS NULL OR b.booker_id = $3) \
             {RECORD_ORDER}"
        );
        let rows = sqlx::query_as::<_, BookingJoinRow>(&query)
            .bind(search.from)
            .bind(search.to)
            .bind(search.booker_id)
            .fetch_all(pool)
            .await?;

        tracing::debug!(rows = rows.len(), "Booking search returned join rows");
        Ok(fold_booking_rows(&rows))
    }

    /// Count a booker's bookings dated `today` or later.
    pub async fn count_upcoming_for_booker(
        pool: &PgPool,
        booker_id: DbId,
        today: Date,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings \
             WHERE booker_id = $1 AND book_date >= $2",
        )
        .bind(booker_id)
        .bind(today)
        .fetch_one(pool)
        .await
    }
}
