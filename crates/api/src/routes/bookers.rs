//! Route definitions for bookers.

use axum::routing::get;
use axum::Router;

use crate::handlers::bookers;
use crate::state::AppState;

/// Routes mounted at `/bookers`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// GET    /{id}/bookings   -> list_bookings (upcoming)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookers::list).post(bookers::create))
        .route(
            "/{id}",
            get(bookers::get_by_id)
                .put(bookers::update)
                .delete(bookers::delete),
        )
        .route("/{id}/bookings", get(bookers::list_bookings))
}
