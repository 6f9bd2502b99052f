use db::models::student;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(length(min = 1, message = "register_number is required"))]
    pub register_number: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[serde(default)]
    pub year: String,
}

/// Partial update. `None` *or* an empty string leaves the field unchanged;
/// the register number is immutable and cannot be updated at all.
#[derive(Debug, Deserialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ListStudentsQuery {
    pub skip: Option<u64>,
    #[validate(range(min = 1, max = 500, message = "limit must be between 1 and 500"))]
    pub limit: Option<u64>,
    pub year: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct StudentResponse {
    pub id: i64,
    pub register_number: String,
    pub name: String,
    pub year: String,
}

impl From<student::Model> for StudentResponse {
    fn from(student: student::Model) -> Self {
        Self {
            id: student.id,
            register_number: student.register_number,
            name: student.name,
            year: student.year,
        }
    }
}
