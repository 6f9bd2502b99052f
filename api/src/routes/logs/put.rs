use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::log_entry::{CheckOutError, Model as LogEntryModel};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::internal_error;
use crate::routes::logs::common::{CheckOutRequest, LogResponse};

/// PUT /api/logs/checkout/{log_id}
///
/// Closes an open session, optionally recording issues the student noticed
/// at the workstation. A closed entry is terminal — checking out twice is
/// refused and the entry is left untouched. Public.
///
/// ### Request Body
/// ```json
/// {
///   "issues_reported": "Mouse broken"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the closed log entry
/// - `400 Bad Request` when the entry is already checked out
/// - `404 Not Found`
pub async fn check_out(
    State(app_state): State<AppState>,
    Path(log_id): Path<i64>,
    Json(req): Json<CheckOutRequest>,
) -> Response {
    match LogEntryModel::check_out(app_state.db(), log_id, req.issues_reported.as_deref()).await {
        Ok(entry) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                LogResponse::from(entry),
                "Checked out successfully",
            )),
        )
            .into_response(),
        Err(CheckOutError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<LogResponse>::error("Log entry not found")),
        )
            .into_response(),
        Err(CheckOutError::AlreadyCheckedOut) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LogResponse>::error("Already checked out")),
        )
            .into_response(),
        Err(CheckOutError::Db(e)) => {
            tracing::error!(error = %e, "check-out failed");
            internal_error::<LogResponse>()
        }
    }
}
