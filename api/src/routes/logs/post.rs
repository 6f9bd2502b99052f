use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::log_entry::{CheckInError, Model as LogEntryModel};
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{format_validation_errors, internal_error};
use crate::routes::logs::common::{CheckInRequest, LogResponse};

/// POST /api/logs/checkin
///
/// Opens a session for a student at a workstation, snapshotting the
/// student's current name and year onto the new log entry. Public — this is
/// the kiosk's entry point.
///
/// ### Request Body
/// ```json
/// {
///   "student_id": "21CS101",
///   "computer_number": "PC-01",
///   "purpose": "Research"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the open log entry
/// - `400 Bad Request`
/// ```json
/// {
///   "success": false,
///   "data": { ... },
///   "message": "Student already checked in."
/// }
/// ```
/// - `404 Not Found` when the register number is unknown
pub async fn check_in(
    State(app_state): State<AppState>,
    Json(req): Json<CheckInRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LogResponse>::error(format_validation_errors(
                &e,
            ))),
        )
            .into_response();
    }

    match LogEntryModel::check_in(
        app_state.db(),
        &req.student_id,
        &req.computer_number,
        &req.purpose,
    )
    .await
    {
        Ok(entry) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                LogResponse::from(entry),
                "Checked in successfully",
            )),
        )
            .into_response(),
        Err(CheckInError::AlreadyCheckedIn) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<LogResponse>::error(
                "Student already checked in.",
            )),
        )
            .into_response(),
        Err(CheckInError::StudentNotFound) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<LogResponse>::error("Student not found")),
        )
            .into_response(),
        Err(CheckInError::Db(e)) => {
            tracing::error!(error = %e, "check-in failed");
            internal_error::<LogResponse>()
        }
    }
}
