use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::student::Model as StudentModel;
use util::state::AppState;

use crate::auth::AdminUser;
use crate::response::ApiResponse;
use crate::routes::common::internal_error;

/// DELETE /api/students/{student_id}
///
/// Removes a student from the roster by database id. Admin only. Historical
/// log entries keep their check-in snapshot of the student's fields and are
/// not touched.
///
/// ### Responses
/// - `200 OK` with a confirmation message
/// - `404 Not Found`
pub async fn remove(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(student_id): Path<i64>,
) -> Response {
    match StudentModel::delete_by_id(app_state.db(), student_id).await {
        Ok(true) => (
            StatusCode::OK,
            Json(ApiResponse::success((), "Student deleted successfully")),
        )
            .into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Student not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to delete student");
            internal_error::<()>()
        }
    }
}
