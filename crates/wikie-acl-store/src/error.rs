//! Error types for the store module.

use rusqlite::ErrorCode;
use thiserror::Error;
use wikie_acl_core::CoreError;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Grant list encoding/decoding error.
    #[error("serialization error: {0}")]
    Serialization(#[from] CoreError),

    /// The permission table has not been created yet.
    #[error("table {0} does not exist")]
    TableMissing(String),

    /// The connection lock was poisoned by a panicking writer.
    #[error("connection lock poisoned: {0}")]
    LockPoisoned(String),

    /// The blocking task running a transaction did not complete.
    #[error("blocking task failed: {0}")]
    TaskFailed(String),

    /// Invalid data in storage.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),
}

impl StoreError {
    /// Whether the store itself is unusable, as opposed to a single
    /// transaction having failed.
    pub fn is_unavailable(&self) -> bool {
        match self {
            StoreError::TableMissing(_)
            | StoreError::LockPoisoned(_)
            | StoreError::TaskFailed(_)
            | StoreError::Migration(_) => true,
            StoreError::Database(rusqlite::Error::SqliteFailure(e, _)) => matches!(
                e.code,
                ErrorCode::CannotOpen
                    | ErrorCode::NotADatabase
                    | ErrorCode::PermissionDenied
                    | ErrorCode::ReadOnly
            ),
            _ => false,
        }
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
