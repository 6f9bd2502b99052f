use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::response::ApiResponse;

/// POST /api/admin/login
///
/// Verifies the admin credential. The guard on this route group has already
/// run the Basic-auth check by the time this handler executes, so reaching
/// it *is* the success case — the dashboard calls this once to validate what
/// the administrator typed before storing it for later requests.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": null,
///   "message": "Login successful"
/// }
/// ```
/// - `401 Unauthorized` on a bad or missing credential
pub async fn login() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success((), "Login successful")),
    )
}
