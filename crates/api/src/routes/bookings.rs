//! Route definitions for bookings.

use axum::routing::get;
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// GET    /?start=&end=&booker_id=   -> search
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// DELETE /{id}                      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::search).post(bookings::create))
        .route("/{id}", get(bookings::get_by_id).delete(bookings::delete))
}
