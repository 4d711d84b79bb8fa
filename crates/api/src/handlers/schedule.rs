//! Handler for the per-date schedule view.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use laundry_core::interval::DateInterval;
use laundry_db::repositories::ScheduleRepo;

use crate::error::AppResult;
use crate::extract::AppPath;
use crate::state::AppState;

/// GET /api/v1/schedule/{start}/{end}
///
/// Every date in `[start, end]` mapped to its slots, each with the booker
/// that holds it or `null`. Intervals longer than `MAX_SCHEDULE_DAYS` are
/// rejected.
pub async fn get_schedule(
    State(state): State<AppState>,
    AppPath((start, end)): AppPath<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let interval =
        DateInterval::parse(&start, &end)?.ensure_max_days(state.rules().max_schedule_days)?;
    let schedule = ScheduleRepo::build(&state.pool, &interval).await?;
    Ok(Json(schedule))
}
