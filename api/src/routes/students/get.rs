use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use db::models::{log_entry::Model as LogEntryModel, student::Model as StudentModel};
use db::usage::UsageStats;
use serde::Serialize;
use util::state::AppState;
use validator::Validate;

use crate::auth::AdminUser;
use crate::response::ApiResponse;
use crate::routes::common::{format_validation_errors, internal_error};
use crate::routes::students::common::{ListStudentsQuery, StudentResponse};

/// GET /api/students
///
/// Paged roster listing, optionally restricted to a single cohort. Admin
/// only.
///
/// ### Query Parameters
/// - `skip` (optional): rows to skip, default 0
/// - `limit` (optional): page size, default 100, max 500
/// - `year` (optional): exact cohort label to filter by
///
/// ### Responses
/// - `200 OK` with a list of students in insertion order
/// - `400 Bad Request` on invalid query parameters
/// - `401 Unauthorized` on a bad or missing credential
pub async fn list(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<ListStudentsQuery>,
) -> Response {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Vec<StudentResponse>>::error(
                format_validation_errors(&e),
            )),
        )
            .into_response();
    }

    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(100);

    match StudentModel::list(app_state.db(), skip, limit, query.year.as_deref()).await {
        Ok(students) => {
            let students: Vec<StudentResponse> =
                students.into_iter().map(StudentResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    students,
                    "Students retrieved successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to list students");
            internal_error::<Vec<StudentResponse>>()
        }
    }
}

/// GET /api/students/{register_number}
///
/// Public lookup by register number, used by the check-in form to greet the
/// student before opening a session.
///
/// ### Responses
/// - `200 OK` with the student
/// - `404 Not Found`
/// ```json
/// {
///   "success": false,
///   "data": { ... },
///   "message": "Student not found"
/// }
/// ```
pub async fn get_student(
    State(app_state): State<AppState>,
    Path(register_number): Path<String>,
) -> Response {
    match StudentModel::get_by_register_number(app_state.db(), &register_number).await {
        Ok(Some(student)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentResponse::from(student),
                "Student retrieved successfully",
            )),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<StudentResponse>::error("Student not found")),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to look up student");
            internal_error::<StudentResponse>()
        }
    }
}

#[derive(Debug, Serialize, Default)]
pub struct StudentStatsResponse {
    pub register_number: String,
    pub total_hours: f64,
    pub subject_breakdown: BTreeMap<String, f64>,
}

/// GET /api/students/{register_number}/stats
///
/// Usage statistics summed over the student's closed sessions, grouped by
/// purpose. Admin only. An unknown register number simply has no closed
/// sessions and reports zeros.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "register_number": "21CS101",
///     "total_hours": 1.5,
///     "subject_breakdown": { "Research": 1.0, "Assignment": 0.5 }
///   },
///   "message": "Stats computed successfully"
/// }
/// ```
pub async fn stats(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Path(register_number): Path<String>,
) -> Response {
    match LogEntryModel::closed_for_student(app_state.db(), &register_number).await {
        Ok(logs) => {
            let stats = UsageStats::from_logs(&logs);
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    StudentStatsResponse {
                        register_number,
                        total_hours: stats.total_hours,
                        subject_breakdown: stats.subject_breakdown,
                    },
                    "Stats computed successfully",
                )),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to compute stats");
            internal_error::<StudentStatsResponse>()
        }
    }
}

/// GET /api/students/template
///
/// Downloadable CSV skeleton for the bulk import, with the required header
/// row and two sample rows. Admin only.
pub async fn template(_admin: AdminUser) -> Response {
    let body = "register_number,name,year\n\
                21CS101,John Doe,1st Year\n\
                21CS102,Jane Smith,2nd Year\n";

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=student_import_template.csv"),
    );

    (StatusCode::OK, (headers, body.to_string())).into_response()
}
