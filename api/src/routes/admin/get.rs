use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use db::models::log_entry::Model as LogEntryModel;
use serde::Deserialize;
use util::state::AppState;
use validator::Validate;

use crate::response::ApiResponse;
use crate::routes::common::{format_validation_errors, internal_error};
use crate::routes::csv::esc;
use crate::routes::logs::common::LogResponse;

#[derive(Debug, Deserialize, Validate)]
pub struct ListLogsQuery {
    pub skip: Option<u64>,
    #[validate(range(min = 1, max = 500, message = "limit must be between 1 and 500"))]
    pub limit: Option<u64>,
}

/// GET /api/admin/logs
///
/// Paged listing of the whole log table in insertion order, open and closed
/// entries alike.
///
/// ### Query Parameters
/// - `skip` (optional): rows to skip, default 0
/// - `limit` (optional): page size, default 100, max 500
pub async fn list_logs(
    State(app_state): State<AppState>,
    Query(query): Query<ListLogsQuery>,
) -> Response {
    if let Err(e) = query.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<Vec<LogResponse>>::error(
                format_validation_errors(&e),
            )),
        )
            .into_response();
    }

    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(100);

    match LogEntryModel::list(app_state.db(), skip, limit).await {
        Ok(entries) => {
            let entries: Vec<LogResponse> = entries.into_iter().map(LogResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(entries, "Logs retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to list logs");
            internal_error::<Vec<LogResponse>>()
        }
    }
}

const EXPORT_ROW_CAP: u64 = 10_000;

/// GET /api/admin/export
///
/// Dumps the log table (up to 10 000 rows) as a `text/csv` attachment named
/// `logs.csv`. The header row and column order are fixed; values are written
/// in their stored form and nulls render empty. Zero log rows yield the
/// header line only.
pub async fn export_logs(State(app_state): State<AppState>) -> Response {
    let entries = match LogEntryModel::list(app_state.db(), 0, EXPORT_ROW_CAP).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(error = %e, "failed to export logs");
            return internal_error::<()>();
        }
    };

    let mut out =
        String::from("ID,Register Number,Name,Year,Computer,Subject,Check-in,Check-out,Issues\n");
    for entry in entries {
        let row = format!(
            "{},{},{},{},{},{},{},{},{}\n",
            entry.id,
            esc(&entry.student_id),
            esc(&entry.student_name),
            esc(&entry.year),
            esc(&entry.computer_number),
            esc(&entry.purpose),
            esc(&entry.check_in_time.to_rfc3339()),
            esc(&entry
                .check_out_time
                .map(|t| t.to_rfc3339())
                .unwrap_or_default()),
            esc(entry.issues_reported.as_deref().unwrap_or_default()),
        );
        out.push_str(&row);
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=logs.csv"),
    );

    (StatusCode::OK, (headers, out)).into_response()
}
