//! Core error types for the ledger.
//!
//! This module defines storage-agnostic error types. Backend-specific errors
//! are converted to these types by the storage layer.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the ledger core.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested record does not exist (or is hidden by soft deletion).
    #[error("Not found: {0}")]
    NotFound(String),

    /// A caller supplied an out-of-range argument, e.g. page 0.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The endpoint is deliberately disabled until it moves elsewhere.
    #[error("Endpoint '{endpoint}' needs migration to {destination}")]
    MigrationIncomplete {
        endpoint: String,
        destination: String,
    },

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),
}

/// Coarse classification of an [`Error`] for outer layers that map errors to
/// transport statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidArgument,
    MigrationIncomplete,
    Validation,
    Internal,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) | Error::Database(DatabaseError::NotFound(_)) => ErrorKind::NotFound,
            Error::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Error::MigrationIncomplete { .. } => ErrorKind::MigrationIncomplete,
            Error::Validation(_) | Error::Database(DatabaseError::UniqueViolation(_)) => {
                ErrorKind::Validation
            }
            Error::Database(_) => ErrorKind::Internal,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub(crate) fn currency_not_found(currency_id: i32) -> Self {
        Error::NotFound(format!("Currency {} not found", currency_id))
    }
}

/// Storage-agnostic error type for repository operations.
///
/// Backends convert their own failures into these variants.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate currency code).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// Internal/unexpected storage error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Currency {currency_id} is the default of group {user_group_id}")]
    DefaultCurrencyLocked {
        currency_id: i32,
        user_group_id: i32,
    },

    #[error("Currency {0} is still in use")]
    CurrencyInUse(i32),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
