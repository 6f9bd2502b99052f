pub mod m20250801_000001_create_students;
pub mod m20250801_000002_create_logs;
