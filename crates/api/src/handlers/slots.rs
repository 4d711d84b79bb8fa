//! Handlers for the `/slots` resource.
//!
//! Slots are weekly recurring windows; each carries the machines it covers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use laundry_core::error::CoreError;
use laundry_core::types::DbId;
use laundry_db::models::slot::{CreateSlot, SlotWithMachines, UpdateSlot};
use laundry_db::repositories::SlotRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::state::AppState;

/// Request body for attaching machines to a slot.
#[derive(Debug, Deserialize)]
pub struct AddMachinesRequest {
    pub machine_ids: Vec<DbId>,
}

fn slot_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Slot", id })
}

async fn load_with_machines(state: &AppState, id: DbId) -> AppResult<SlotWithMachines> {
    SlotRepo::find_by_id_with_machines(&state.pool, id)
        .await?
        .ok_or_else(|| slot_not_found(id))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/slots
///
/// The whole catalog ordered by weekday and start time, machines included.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let slots = SlotRepo::list_with_machines(&state.pool).await?;
    Ok(Json(slots))
}

/// POST /api/v1/slots
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateSlot>,
) -> AppResult<impl IntoResponse> {
    let window = input.window(state.rules().min_slot_duration_minutes)?;
    let slot = SlotRepo::create(&state.pool, &window, &input.machine_ids).await?;
    tracing::info!(
        slot_id = slot.id,
        weekday = slot.weekday,
        machines = input.machine_ids.len(),
        "Slot created",
    );

    let with_machines = load_with_machines(&state, slot.id).await?;
    Ok((StatusCode::CREATED, Json(with_machines)))
}

/// GET /api/v1/slots/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let slot = load_with_machines(&state, id).await?;
    Ok(Json(slot))
}

/// PUT /api/v1/slots/{id}
///
/// Replaces the window. If `machine_ids` is present, replaces the machines too.
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateSlot>,
) -> AppResult<impl IntoResponse> {
    let window = input.window(state.rules().min_slot_duration_minutes)?;
    SlotRepo::update(&state.pool, id, &window, input.machine_ids.as_deref())
        .await?
        .ok_or_else(|| slot_not_found(id))?;

    let with_machines = load_with_machines(&state, id).await?;
    Ok(Json(with_machines))
}

/// DELETE /api/v1/slots/{id}
///
/// Bookings of the slot are deleted with it.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if SlotRepo::delete(&state.pool, id).await? {
        tracing::info!(slot_id = id, "Slot deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(slot_not_found(id))
    }
}

/// POST /api/v1/slots/{id}/machines
///
/// Attach one or more machines. Already attached machines are left as is.
pub async fn add_machines(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(body): AppJson<AddMachinesRequest>,
) -> AppResult<impl IntoResponse> {
    SlotRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| slot_not_found(id))?;

    SlotRepo::add_machines(&state.pool, id, &body.machine_ids).await?;

    let with_machines = load_with_machines(&state, id).await?;
    Ok(Json(with_machines))
}

/// DELETE /api/v1/slots/{id}/machines/{machine_id}
pub async fn remove_machine(
    State(state): State<AppState>,
    AppPath((id, machine_id)): AppPath<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if SlotRepo::remove_machine(&state.pool, id, machine_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "SlotMachine",
            id: machine_id,
        }))
    }
}
