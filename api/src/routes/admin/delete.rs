use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::log_entry::Model as LogEntryModel;
use serde::{Deserialize, Serialize};
use util::state::AppState;

use crate::response::ApiResponse;
use crate::routes::common::internal_error;

#[derive(Debug, Serialize, Default)]
pub struct PurgeResponse {
    pub deleted: u64,
}

#[derive(Debug, Deserialize)]
pub struct PurgeByIdsRequest {
    pub ids: Vec<i64>,
}

/// DELETE /api/admin/logs
///
/// Purges the entire log history in one transaction; a store failure rolls
/// everything back and nothing is deleted.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "deleted": 42 },
///   "message": "Logs deleted successfully"
/// }
/// ```
pub async fn purge_logs(State(app_state): State<AppState>) -> Response {
    match LogEntryModel::delete_all(app_state.db()).await {
        Ok(deleted) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                PurgeResponse { deleted },
                "Logs deleted successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to purge logs, rolled back");
            internal_error::<PurgeResponse>()
        }
    }
}

/// DELETE /api/admin/logs/bulk
///
/// Purges the selected log entries in one transaction. Unknown ids are not
/// counted; an empty list deletes nothing.
///
/// ### Request Body
/// ```json
/// { "ids": [3, 4, 7] }
/// ```
pub async fn purge_logs_by_ids(
    State(app_state): State<AppState>,
    Json(req): Json<PurgeByIdsRequest>,
) -> Response {
    match LogEntryModel::delete_by_ids(app_state.db(), &req.ids).await {
        Ok(deleted) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                PurgeResponse { deleted },
                "Logs deleted successfully",
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to purge selected logs, rolled back");
            internal_error::<PurgeResponse>()
        }
    }
}
