//! Route definitions for the slot catalog.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::slots;
use crate::state::AppState;

/// Routes mounted at `/slots`.
///
/// ```text
/// GET    /                            -> list
/// POST   /                            -> create
/// GET    /{id}                        -> get_by_id
/// PUT    /{id}                        -> update
/// DELETE /{id}                        -> delete
/// POST   /{id}/machines               -> add_machines
/// DELETE /{id}/machines/{machine_id}  -> remove_machine
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(slots::list).post(slots::create))
        .route(
            "/{id}",
            get(slots::get_by_id)
                .put(slots::update)
                .delete(slots::delete),
        )
        .route("/{id}/machines", post(slots::add_machines))
        .route("/{id}/machines/{machine_id}", delete(slots::remove_machine))
}
