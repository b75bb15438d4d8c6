//! Error types for airq-store.

use std::path::PathBuf;

/// Result type for airq-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in airq-store.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The database was written with a schema this build does not know.
    #[error("Unsupported schema version {found} (expected {supported})")]
    UnsupportedSchema { found: i32, supported: i32 },

    /// The query plan cannot be served by the table layout.
    #[error("Invalid query plan: {0}")]
    InvalidPlan(String),
}
