use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::response::ApiResponse;

/// Opaque 500 for store-layer failures; the detail goes to the log, not the
/// caller.
pub fn internal_error<T: Serialize + Default>() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::<T>::error("An internal error occurred")),
    )
        .into_response()
}

/// Flattens `validator` failures into one human-readable string, sorted for
/// deterministic output.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("{field} is invalid")),
            }
        }
    }
    messages.sort();
    messages.join(", ")
}
