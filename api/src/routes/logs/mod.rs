//! Routes for the `/api/logs` endpoint group: the public check-in/check-out
//! lifecycle driven by the lab kiosk.

use axum::{
    Router,
    routing::{get, post, put},
};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/logs` route group.
///
/// - `POST /logs/checkin` → open a session
/// - `PUT /logs/checkout/{log_id}` → close a session
/// - `GET /logs/active/{student_id}` → the open session, if any
pub fn logs_routes() -> Router<AppState> {
    Router::new()
        .route("/checkin", post(post::check_in))
        .route("/checkout/{log_id}", put(put::check_out))
        .route("/active/{student_id}", get(get::get_active))
}
