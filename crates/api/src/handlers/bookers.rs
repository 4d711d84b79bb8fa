//! Handlers for the `/bookers` resource.
//!
//! A booker is a household (apartment) allowed to reserve laundry slots.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use laundry_core::error::CoreError;
use laundry_core::types::DbId;
use laundry_core::validation::require_non_empty;
use laundry_db::models::booker::{CreateBooker, UpdateBooker};
use laundry_db::models::booking::BookingSearch;
use laundry_db::repositories::{BookerRepo, BookingRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/bookers
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let bookers = BookerRepo::list(&state.pool).await?;
    Ok(Json(bookers))
}

/// POST /api/v1/bookers
///
/// Duplicate identifiers are rejected with 409.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateBooker>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.identifier, "identifier")?;

    let booker = BookerRepo::create(&state.pool, &input).await?;
    tracing::info!(booker_id = booker.id, identifier = %booker.identifier, "Booker created");
    Ok((StatusCode::CREATED, Json(booker)))
}

/// GET /api/v1/bookers/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let booker = BookerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booker",
            id,
        }))?;
    Ok(Json(booker))
}

/// PUT /api/v1/bookers/{id}
///
/// Only the contact fields present in the body are changed.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateBooker>,
) -> AppResult<impl IntoResponse> {
    let booker = BookerRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booker",
            id,
        }))?;
    Ok(Json(booker))
}

/// DELETE /api/v1/bookers/{id}
///
/// The booker's bookings are deleted with it.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if BookerRepo::delete(&state.pool, id).await? {
        tracing::info!(booker_id = id, "Booker deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Booker",
            id,
        }))
    }
}

/// GET /api/v1/bookers/{id}/bookings
///
/// Bookings of one booker dated today or later.
pub async fn list_bookings(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    BookerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booker",
            id,
        }))?;

    let today = Utc::now().date_naive();
    let bookings = BookingRepo::search(&state.pool, &BookingSearch::upcoming(id, today)).await?;
    Ok(Json(bookings))
}
