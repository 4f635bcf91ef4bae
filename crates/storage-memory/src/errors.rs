//! Storage-specific error types.
//!
//! These errors are internal to the storage layer and are converted to
//! `ledger_core::Error` before being returned to callers.

use thiserror::Error;
use ledger_core::errors::{DatabaseError, Error};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Snapshot lock poisoned")]
    LockPoisoned,

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("No identifiers left for {0}")]
    IdExhausted(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(e) => Error::Database(DatabaseError::NotFound(e)),
            StorageError::Duplicate(e) => Error::Database(DatabaseError::UniqueViolation(e)),
            StorageError::IdExhausted(e) => Error::Database(DatabaseError::Internal(format!(
                "no identifiers left for {}",
                e
            ))),
            StorageError::Io(e) => Error::Database(DatabaseError::QueryFailed(e.to_string())),
            StorageError::Serialization(e) => {
                Error::Database(DatabaseError::Internal(e.to_string()))
            }
            StorageError::LockPoisoned => {
                Error::Database(DatabaseError::Internal("snapshot lock poisoned".to_string()))
            }
        }
    }
}
