use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::log_entry::Model as LogEntryModel;
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::internal_error;
use crate::routes::logs::common::LogResponse;

/// GET /api/logs/active/{student_id}
///
/// The student's open session, if any. Public — the kiosk uses this to show
/// the check-out button instead of the check-in form.
///
/// ### Responses
/// - `200 OK` with the open log entry
/// - `404 Not Found`
/// ```json
/// {
///   "success": false,
///   "data": { ... },
///   "message": "No active session found"
/// }
/// ```
pub async fn get_active(
    State(app_state): State<AppState>,
    Path(student_id): Path<String>,
) -> Response {
    match LogEntryModel::active_for_student(app_state.db(), &student_id).await {
        Ok(Some(entry)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                LogResponse::from(entry),
                "Active session retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<LogResponse>::error("No active session found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to look up active session");
            internal_error::<LogResponse>()
        }
    }
}
