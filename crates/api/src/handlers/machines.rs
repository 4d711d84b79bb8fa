//! Handlers for the `/machines` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use laundry_core::error::CoreError;
use laundry_core::types::DbId;
use laundry_db::models::machine::{MachineFields, MachineInput};
use laundry_db::repositories::MachineRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, ValidatedJson};
use crate::state::AppState;

/// GET /api/v1/machines
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let machines = MachineRepo::list(&state.pool).await?;
    Ok(Json(machines))
}

/// POST /api/v1/machines
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<MachineInput>,
) -> AppResult<impl IntoResponse> {
    let fields = MachineFields::try_from(input)?;
    let machine = MachineRepo::create(&state.pool, &fields).await?;
    tracing::info!(machine_id = machine.id, "Machine created");
    Ok((StatusCode::CREATED, Json(machine)))
}

/// GET /api/v1/machines/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let machine = MachineRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Machine",
            id,
        }))?;
    Ok(Json(machine))
}

/// PUT /api/v1/machines/{id}
///
/// Both `info` and `working` must be supplied.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidatedJson(input): ValidatedJson<MachineInput>,
) -> AppResult<impl IntoResponse> {
    let fields = MachineFields::try_from(input)?;
    let machine = MachineRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Machine",
            id,
        }))?;
    Ok(Json(machine))
}

/// DELETE /api/v1/machines/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if MachineRepo::delete(&state.pool, id).await? {
        tracing::info!(machine_id = id, "Machine deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Machine",
            id,
        }))
    }
}
