//! Route definitions for machines.

use axum::routing::get;
use axum::Router;

use crate::handlers::machines;
use crate::state::AppState;

/// Routes mounted at `/machines`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(machines::list).post(machines::create))
        .route(
            "/{id}",
            get(machines::get_by_id)
                .put(machines::update)
                .delete(machines::delete),
        )
}
