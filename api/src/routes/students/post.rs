use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::student::{
    self, Column as StudentColumn, Entity as StudentEntity, Model as StudentModel,
};
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
    TransactionTrait,
};
use serde::Serialize;
use util::state::AppState;
use validator::Validate;

use crate::auth::AdminUser;
use crate::response::ApiResponse;
use crate::routes::common::{format_validation_errors, internal_error};
use crate::routes::csv;
use crate::routes::students::common::{CreateStudentRequest, StudentResponse};

/// POST /api/students
///
/// Registers a single student. Admin only.
///
/// ### Request Body
/// ```json
/// {
///   "register_number": "21CS101",
///   "name": "John Doe",
///   "year": "1st Year"
/// }
/// ```
///
/// ### Responses
/// - `201 Created` with the new student
/// - `400 Bad Request` on validation failure
/// - `409 Conflict`
/// ```json
/// {
///   "success": false,
///   "data": { ... },
///   "message": "Student already registered"
/// }
/// ```
pub async fn create(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    Json(req): Json<CreateStudentRequest>,
) -> Response {
    if let Err(e) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<StudentResponse>::error(
                format_validation_errors(&e),
            )),
        )
            .into_response();
    }

    let db = app_state.db();

    match StudentModel::get_by_register_number(db, &req.register_number).await {
        Ok(Some(_)) => {
            return conflict();
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(error = %e, "failed to check for existing student");
            return internal_error::<StudentResponse>();
        }
    }

    match StudentModel::create(db, &req.register_number, &req.name, &req.year).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                StudentResponse::from(created),
                "Student created successfully",
            )),
        )
            .into_response(),
        // The unique index backstops a create racing past the lookup above.
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => conflict(),
        Err(e) => {
            tracing::error!(error = %e, "failed to create student");
            internal_error::<StudentResponse>()
        }
    }
}

fn conflict() -> Response {
    (
        StatusCode::CONFLICT,
        Json(ApiResponse::<StudentResponse>::error(
            "Student already registered",
        )),
    )
        .into_response()
}

#[derive(Debug, Serialize, Default)]
pub struct ImportSummaryResponse {
    pub created: usize,
    pub errors: Vec<String>,
}

/// POST /api/students/import
///
/// Bulk roster import from an uploaded CSV file. Admin only.
///
/// ### Request Body (Multipart Form Data)
/// - `file` (required): CSV whose header row contains `register_number`,
///   `name` and `year` in any column order.
///
/// Per row: fields are trimmed; rows missing a register number or name are
/// skipped silently; rows whose register number is already on the roster are
/// skipped silently — an import never overwrites an existing student.
/// Malformed rows collect an error message without failing the batch. The
/// whole import runs in one transaction, so a store failure commits nothing.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "created": 2, "errors": [] },
///   "message": "Successfully imported 2 students"
/// }
/// ```
/// - `400 Bad Request` on a missing file, non-UTF-8 content or a header row
///   without the required columns
pub async fn import(
    State(app_state): State<AppState>,
    _admin: AdminUser,
    mut multipart: Multipart,
) -> Response {
    let mut file: Option<Vec<u8>> = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some("file") {
                    match field.bytes().await {
                        Ok(bytes) => file = Some(bytes.to_vec()),
                        Err(_) => return bad_request("Failed to read uploaded file"),
                    }
                }
            }
            Ok(None) => break,
            Err(_) => return bad_request("Invalid multipart request"),
        }
    }

    let Some(raw) = file else {
        return bad_request("Missing file upload");
    };
    let Ok(content) = String::from_utf8(raw) else {
        return bad_request("File must be UTF-8 encoded text");
    };

    match run_import(app_state.db(), &content).await {
        Ok(outcome) => {
            let message = format!("Successfully imported {} students", outcome.created);
            (StatusCode::OK, Json(ApiResponse::success(outcome, message))).into_response()
        }
        Err(ImportError::BadInput(message)) => bad_request(&message),
        Err(ImportError::Db(e)) => {
            tracing::error!(error = %e, "student import failed, rolled back");
            internal_error::<ImportSummaryResponse>()
        }
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<ImportSummaryResponse>::error(message)),
    )
        .into_response()
}

enum ImportError {
    BadInput(String),
    Db(DbErr),
}

impl From<DbErr> for ImportError {
    fn from(e: DbErr) -> Self {
        ImportError::Db(e)
    }
}

const REQUIRED_HEADERS: [&str; 3] = ["register_number", "name", "year"];

async fn run_import(
    db: &DatabaseConnection,
    content: &str,
) -> Result<ImportSummaryResponse, ImportError> {
    let mut lines = content.lines();
    let Some(header_line) = lines.next() else {
        return Err(ImportError::BadInput("The uploaded file is empty".into()));
    };

    let headers: Vec<String> = csv::split_line(header_line)
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut indices = [0usize; 3];
    for (i, required) in REQUIRED_HEADERS.iter().enumerate() {
        match headers.iter().position(|h| h == required) {
            Some(pos) => indices[i] = pos,
            None => {
                return Err(ImportError::BadInput(
                    "Invalid headers. Required: register_number, name, year".into(),
                ));
            }
        }
    }

    let txn = db.begin().await?;
    let mut created = 0usize;
    let mut errors = Vec::new();

    for (line_index, line) in lines.enumerate() {
        let row_number = line_index + 2;
        if line.trim().is_empty() {
            continue;
        }

        let fields = csv::split_line(line);
        if fields.len() < headers.len() {
            errors.push(format!(
                "Row {row_number}: expected {} columns, found {}",
                headers.len(),
                fields.len()
            ));
            continue;
        }

        let register_number = fields[indices[0]].trim();
        let name = fields[indices[1]].trim();
        let year = fields[indices[2]].trim();

        // Unusable rows are skipped, not reported.
        if register_number.is_empty() || name.is_empty() {
            continue;
        }

        // Existing students are never overwritten by an import.
        let existing = StudentEntity::find()
            .filter(StudentColumn::RegisterNumber.eq(register_number))
            .one(&txn)
            .await?;
        if existing.is_some() {
            continue;
        }

        let new_student = student::ActiveModel {
            register_number: Set(register_number.to_owned()),
            name: Set(name.to_owned()),
            year: Set(year.to_owned()),
            ..Default::default()
        };
        new_student.insert(&txn).await?;
        created += 1;
    }

    txn.commit().await?;
    Ok(ImportSummaryResponse { created, errors })
}
