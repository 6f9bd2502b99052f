//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → health check (public)
//! - `/students` → roster management; lookup by register number is public,
//!   everything else checks the admin credential per handler
//! - `/logs` → check-in / check-out lifecycle (public, used by the kiosk)
//! - `/admin` → log review, export and purge (entirely behind the admin
//!   guard middleware)

use axum::{Router, middleware::from_fn_with_state};
use util::state::AppState;

use crate::auth::guards::allow_admin;
use crate::routes::{
    admin::admin_routes, health::health_routes, logs::logs_routes, students::students_routes,
};

pub mod admin;
pub mod common;
pub mod csv;
pub mod health;
pub mod logs;
pub mod students;

/// Builds the complete application router mounted under `/api`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/students", students_routes())
        .nest("/logs", logs_routes())
        .nest(
            "/admin",
            admin_routes().route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .with_state(app_state)
}
