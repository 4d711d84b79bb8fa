//! Handlers for the `/bookings` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use laundry_core::booking::{check_booking_limit, check_booking_weekday};
use laundry_core::error::CoreError;
use laundry_core::interval::DateInterval;
use laundry_core::types::DbId;
use laundry_core::validation::require;
use laundry_db::models::booking::{BookingSearch, CreateBooking, NewBooking};
use laundry_db::repositories::{BookerRepo, BookingRepo, SlotRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::state::AppState;

/// Query parameters for `GET /bookings`. Both dates are required.
#[derive(Debug, Deserialize)]
pub struct BookingSearchParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub booker_id: Option<DbId>,
}

/// GET /api/v1/bookings?start=YYYY-MM-DD&end=YYYY-MM-DD&booker_id=
///
/// Bookings dated within `[start, end]`, optionally for one booker.
pub async fn search(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<BookingSearchParams>,
) -> AppResult<impl IntoResponse> {
    let start = require(params.start.as_deref(), "start")?;
    let end = require(params.end.as_deref(), "end")?;
    let interval = DateInterval::parse(start, end)?;

    let search = BookingSearch::interval(&interval).with_booker(params.booker_id);
    let bookings = BookingRepo::search(&state.pool, &search).await?;
    Ok(Json(bookings))
}

/// POST /api/v1/bookings
///
/// The slot and booker must exist and the date must fall on the slot's
/// weekday. A slot can be booked once per date (409 otherwise).
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateBooking>,
) -> AppResult<impl IntoResponse> {
    let booking = NewBooking::try_from(&input)?;

    let slot = SlotRepo::find_by_id(&state.pool, booking.slot_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Slot",
            id: booking.slot_id,
        }))?;
    BookerRepo::find_by_id(&state.pool, booking.booker_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booker",
            id: booking.booker_id,
        }))?;

    check_booking_weekday(booking.book_date, slot.id, slot.weekday)?;

    let max = state.rules().max_bookings_per_booker;
    let today = Utc::now().date_naive();
    if max > 0 && booking.book_date >= today {
        let upcoming =
            BookingRepo::count_upcoming_for_booker(&state.pool, booking.booker_id, today).await?;
        check_booking_limit(booking.booker_id, upcoming, max)?;
    }

    let created = BookingRepo::create(&state.pool, &booking).await?;
    tracing::info!(
        booking_id = created.id,
        slot_id = created.slot_id,
        booker_id = created.booker_id,
        book_date = %created.book_date,
        "Booking created",
    );

    let record = BookingRepo::find_record_by_id(&state.pool, created.id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Booking {} vanished", created.id)))?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/bookings/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = BookingRepo::find_record_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;
    Ok(Json(record))
}

/// DELETE /api/v1/bookings/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if BookingRepo::delete(&state.pool, id).await? {
        tracing::info!(booking_id = id, "Booking cancelled");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))
    }
}
