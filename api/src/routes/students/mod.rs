//! Routes for the `/api/students` endpoint group.
//!
//! Lookup by register number is public so the check-in form can greet the
//! student; every other operation checks the admin credential through the
//! `AdminUser` extractor (this group mixes public and admin routes, so a
//! router-level guard cannot apply).

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

/// Builds the `/students` route group.
///
/// - `POST /students` → create (admin)
/// - `GET /students` → paged roster listing (admin)
/// - `POST /students/import` → bulk CSV import (admin)
/// - `GET /students/template` → CSV import skeleton (admin)
/// - `GET /students/{register_number}` → public lookup
/// - `PUT /students/{register_number}` → partial update by database id (admin)
/// - `DELETE /students/{register_number}` → delete by database id (admin)
/// - `GET /students/{register_number}/stats` → usage statistics (admin)
pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(post::create).get(get::list))
        .route("/import", post(post::import))
        .route("/template", get(get::template))
        .route(
            "/{register_number}",
            get(get::get_student)
                .put(put::update)
                .delete(delete::remove),
        )
        .route("/{register_number}/stats", get(get::stats))
}
