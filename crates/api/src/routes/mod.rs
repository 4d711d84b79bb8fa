pub mod bookers;
pub mod bookings;
pub mod health;
pub mod machines;
pub mod schedule;
pub mod slots;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /bookers                                  list, create
/// /bookers/{id}                             get, update, delete
/// /bookers/{id}/bookings                    upcoming bookings of a booker
///
/// /machines                                 list, create
/// /machines/{id}                            get, update, delete
///
/// /slots                                    list, create
/// /slots/{id}                               get, update, delete
/// /slots/{id}/machines                      attach machines (POST)
/// /slots/{id}/machines/{machine_id}         detach machine (DELETE)
///
/// /bookings?start=&end=&booker_id=          search
/// /bookings                                 create (POST)
/// /bookings/{id}                            get, delete
///
/// /schedule/{start}/{end}                   per-date schedule
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/bookers", bookers::router())
        .nest("/machines", machines::router())
        .nest("/slots", slots::router())
        .nest("/bookings", bookings::router())
        .nest("/schedule", schedule::router())
}
