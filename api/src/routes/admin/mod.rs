//! Routes for the `/api/admin` endpoint group: credential check, log review,
//! CSV export and administrative purge.
//!
//! The whole group is admin-facing, so the Basic-auth check runs once as the
//! `allow_admin` guard layered on this router in `routes::routes`.

use axum::{
    Router,
    routing::{delete, get, post},
};
use util::state::AppState;

pub mod delete;
pub mod get;
pub mod post;

/// Builds the `/admin` route group.
///
/// - `POST /admin/login` → credential check
/// - `GET /admin/logs` → paged log listing
/// - `DELETE /admin/logs` → purge the whole log history
/// - `DELETE /admin/logs/bulk` → purge selected entries
/// - `GET /admin/export` → CSV download
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(post::login))
        .route("/logs", get(get::list_logs).delete(delete::purge_logs))
        .route("/logs/bulk", delete(delete::purge_logs_by_ids))
        .route("/export", get(get::export_logs))
}
