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
use crate::routes::students::common::{StudentResponse, UpdateStudentRequest};

/// PUT /api/students/{student_id}
///
/// Partial update of a student's mutable fields by database id. Admin only.
/// An absent or empty field leaves the stored value unchanged; the register
/// number is immutable.
///
/// ### Request Body
/// ```json
/// {
///   "name": "Jane Doe",
///   "year": "2nd Year"
/// }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated student
/// - `404 Not Found`
pub async fn update(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(student_id): Path<i64>,
    Json(req): Json<UpdateStudentRequest>,
) -> Response {
    match StudentModel::update(
        app_state.db(),
        student_id,
        req.name.as_deref(),
        req.year.as_deref(),
    )
    .await
    {
        Ok(Some(student)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentResponse::from(student),
                "Student updated successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<StudentResponse>::error("Student not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to update student");
            internal_error::<StudentResponse>()
        }
    }
}
