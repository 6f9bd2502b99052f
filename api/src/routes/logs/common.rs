use db::models::log_entry;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Check-in request from the kiosk form. `student_id` carries the register
/// number, matching the business key stored on log rows.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckInRequest {
    #[validate(length(min = 1, message = "student_id is required"))]
    pub student_id: String,
    #[validate(length(min = 1, message = "computer_number is required"))]
    pub computer_number: String,
    #[serde(default)]
    pub purpose: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckOutRequest {
    pub issues_reported: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct LogResponse {
    pub id: i64,
    pub student_id: String,
    pub student_name: String,
    pub year: String,
    pub computer_number: String,
    pub purpose: String,
    pub check_in_time: String,
    pub check_out_time: Option<String>,
    pub issues_reported: Option<String>,
}

impl From<log_entry::Model> for LogResponse {
    fn from(entry: log_entry::Model) -> Self {
        Self {
            id: entry.id,
            student_id: entry.student_id,
            student_name: entry.student_name,
            year: entry.year,
            computer_number: entry.computer_number,
            purpose: entry.purpose,
            check_in_time: entry.check_in_time.to_rfc3339(),
            check_out_time: entry.check_out_time.map(|t| t.to_rfc3339()),
            issues_reported: entry.issues_reported,
        }
    }
}
