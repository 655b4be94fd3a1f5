//! Common error types shared across the MspDash crates
//!
//! Two pieces make up the error infrastructure:
//!
//! 1. **`CommonError`**: error patterns that show up in more than one layer
//!    (configuration and storage).
//! 2. **`ErrorClassification`**: a uniform way to ask any error whether it is
//!    retryable, how severe it is, and whether it needs immediate attention.
//!
//! Layer-specific errors compose with `CommonError` instead of duplicating
//! its variants:
//!
//! ```rust,ignore
//! #[derive(Debug, Error)]
//! pub enum StorageError {
//!     #[error("Database pool exhausted")]
//!     PoolExhausted,
//!
//!     #[error(transparent)]
//!     Common(#[from] CommonError),
//! }
//! ```

use std::fmt;
use std::time::Duration;

/// Result alias for operations that fail with [`CommonError`]
pub type CommonResult<T> = Result<T, CommonError>;

/// Error variants shared by several layers
#[derive(Debug, Clone, PartialEq)]
pub enum CommonError {
    /// Configuration-related errors
    Config { message: String, field: Option<String> },

    /// Storage/database errors
    Storage { message: String, operation: Option<String> },
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { message, field } => match field {
                Some(field) => write!(f, "Configuration error in '{}': {}", field, message),
                None => write!(f, "Configuration error: {}", message),
            },
            Self::Storage { message, operation } => match operation {
                Some(op) => write!(f, "Storage error during '{}': {}", op, message),
                None => write!(f, "Storage error: {}", message),
            },
        }
    }
}

impl std::error::Error for CommonError {}

impl CommonError {
    /// Create a simple configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), field: None }
    }

    /// Create a configuration error for a specific field
    pub fn config_field<S: Into<String>, F: Into<String>>(field: F, message: S) -> Self {
        Self::Config { message: message.into(), field: Some(field.into()) }
    }

    /// Create a storage error tagged with the operation that failed
    pub fn storage<S: Into<String>, O: Into<String>>(operation: O, message: S) -> Self {
        Self::Storage { message: message.into(), operation: Some(operation.into()) }
    }

    /// Stable machine-readable label for the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Storage { .. } => "storage",
        }
    }
}

/// Classification interface implemented by every error in the workspace
pub trait ErrorClassification {
    /// Transient failures (timeouts, lock contention) that may succeed on retry
    fn is_retryable(&self) -> bool;

    /// Severity used for log levels
    fn severity(&self) -> ErrorSeverity;

    /// Data corruption, key mismatch and similar integrity problems
    fn is_critical(&self) -> bool;

    /// Suggested delay before retrying, when one is known
    fn retry_after(&self) -> Option<Duration>;
}

impl ErrorClassification for CommonError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Error severity levels for monitoring and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for error.
    use super::*;

    #[test]
    fn display_includes_field_and_operation() {
        let err = CommonError::config_field("database.pool_size", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Configuration error in 'database.pool_size': must be at least 1"
        );

        let err = CommonError::storage("list_clients", "no such table: clients");
        assert_eq!(err.to_string(), "Storage error during 'list_clients': no such table: clients");
    }

    #[test]
    fn config_and_storage_errors_are_plain_failures() {
        for err in [CommonError::config("missing path"), CommonError::storage("open", "denied")] {
            assert!(!err.is_retryable());
            assert!(!err.is_critical());
            assert_eq!(err.severity(), ErrorSeverity::Error);
        }
        assert_eq!(CommonError::config("x").kind(), "config");
    }

    #[test]
    fn severity_orders_by_urgency() {
        assert!(ErrorSeverity::Info < ErrorSeverity::Warning);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
    }
}
