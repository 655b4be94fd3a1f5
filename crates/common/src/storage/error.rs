//! Storage error types
//!
//! Errors raised by the SQLCipher pool and its connections, classified with
//! the shared [`ErrorClassification`] trait.

use thiserror::Error;

use crate::error::{CommonError, ErrorClassification, ErrorSeverity};

/// Storage error type
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(String),

    #[error("Database encryption error: {0}")]
    Encryption(String),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Wrong encryption key or database not encrypted")]
    WrongKeyOrNotEncrypted,

    #[error("Connection timeout after {0}s")]
    Timeout(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: i32, found: i32 },

    #[error(transparent)]
    Common(#[from] CommonError),

    #[error(transparent)]
    Rusqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    R2d2(#[from] r2d2::Error),
}

/// Storage result type
pub type StorageResult<T> = Result<T, StorageError>;

impl ErrorClassification for StorageError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) => true,
            Self::Rusqlite(err) => matches!(
                err.sqlite_error_code(),
                Some(rusqlite::ErrorCode::DatabaseBusy)
                    | Some(rusqlite::ErrorCode::DatabaseLocked)
            ),
            Self::Common(common_err) => common_err.is_retryable(),
            _ => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Connection(_) | Self::Query(_) | Self::InvalidConfig(_) => ErrorSeverity::Error,
            Self::Encryption(_)
            | Self::Migration(_)
            | Self::WrongKeyOrNotEncrypted
            | Self::SchemaVersionMismatch { .. } => ErrorSeverity::Critical,
            Self::Timeout(_) => ErrorSeverity::Warning,
            Self::Common(common_err) => common_err.severity(),
            Self::Rusqlite(_) | Self::R2d2(_) => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::Encryption(_)
                | Self::Migration(_)
                | Self::WrongKeyOrNotEncrypted
                | Self::SchemaVersionMismatch { .. }
        ) || matches!(self, Self::Common(err) if err.is_critical())
    }

    fn retry_after(&self) -> Option<std::time::Duration> {
        match self {
            Self::Common(common_err) => common_err.retry_after(),
            _ => None,
        }
    }
}

impl StorageError {
    /// Attach the name of the failing operation
    pub fn with_operation(self, operation: impl Into<String>) -> Self {
        Self::Common(CommonError::storage(operation, self.to_string()))
    }

    /// True when SQLite reported a message that means the key does not open the file
    pub(crate) fn looks_like_wrong_key(message: &str) -> bool {
        let lower = message.to_lowercase();
        lower.contains("file is not a database")
            || lower.contains("file is encrypted")
            || lower.contains("database disk image is malformed")
            || lower.contains("notadb")
    }
}

impl From<StorageError> for CommonError {
    fn from(err: StorageError) -> Self {
        if let StorageError::Common(common_err) = err {
            return common_err;
        }

        CommonError::Storage { message: err.to_string(), operation: None }
    }
}
