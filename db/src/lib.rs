pub mod models;
pub mod test_utils;
pub mod usage;

use sea_orm::{Database, DatabaseConnection};
use std::path::Path;
use util::config;

/// Connects to the configured database.
///
/// `DATABASE_PATH` may be a full DSN or a plain SQLite file path; for the
/// latter the parent directory is created first (SQLite won't create
/// intermediate dirs) and the file is opened in create mode.
pub async fn connect() -> DatabaseConnection {
    let path_or_url = config::database_path();
    let url = if path_or_url.starts_with("sqlite:") {
        path_or_url
    } else {
        if let Some(parent) = Path::new(&path_or_url).parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        format!("sqlite://{path_or_url}?mode=rwc")
    };

    Database::connect(&url)
        .await
        .expect("Failed to connect to database")
}
