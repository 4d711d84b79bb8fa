//! Route definitions for the schedule view.

use axum::routing::get;
use axum::Router;

use crate::handlers::schedule;
use crate::state::AppState;

/// Routes mounted at `/schedule`.
///
/// ```text
/// GET /{start}/{end}   -> get_schedule
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{start}/{end}", get(schedule::get_schedule))
}
