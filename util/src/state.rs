//! Application state shared across Axum route handlers.

use crate::config::AdminCredential;
use sea_orm::DatabaseConnection;

/// Central application state passed to handlers via Axum's `State<T>`
/// extractor: the SeaORM connection and the injected admin credential.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    admin: AdminCredential,
}

impl AppState {
    pub fn new(db: DatabaseConnection, admin: AdminCredential) -> Self {
        Self { db, admin }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a cloned copy of the database connection, for contexts that
    /// need ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// The admin credential checked by the access gate.
    pub fn admin(&self) -> &AdminCredential {
        &self.admin
    }
}
