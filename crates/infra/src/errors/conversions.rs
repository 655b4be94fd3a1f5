//! Conversions from external infrastructure errors into domain errors.

use mspdash_common::error::{ErrorClassification, ErrorSeverity};
use mspdash_common::storage::StorageError;
use mspdash_domain::MspDashError;
use rusqlite::Error as SqlError;
use tracing::{error, warn};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MspDashError);

impl From<InfraError> for MspDashError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MspDashError> for InfraError {
    fn from(value: MspDashError) -> Self {
        InfraError(value)
    }
}

trait IntoMspDashError {
    fn into_mspdash(self) -> MspDashError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → MspDashError */
/* -------------------------------------------------------------------------- */

impl IntoMspDashError for SqlError {
    fn into_mspdash(self) -> MspDashError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        fn looks_like_wrong_key(message: &str) -> bool {
            let lower = message.to_ascii_lowercase();
            lower.contains("not a database") || lower.contains("encrypted")
        }

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        MspDashError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        MspDashError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        MspDashError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        MspDashError::Database("foreign key constraint violation".into())
                    }
                    (ErrorCode::NotADatabase, _) => MspDashError::Security(
                        "SQLCipher key rejected or database not encrypted".into(),
                    ),
                    (_, _) if looks_like_wrong_key(&message) => MspDashError::Security(
                        "SQLCipher key rejected or database not encrypted".into(),
                    ),
                    _ => MspDashError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => MspDashError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                MspDashError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                MspDashError::Database(format!("invalid column type for '{name}': {ty}"))
            }
            RE::InvalidColumnName(name) => {
                MspDashError::Database(format!("unknown column: {name}"))
            }
            RE::Utf8Error(_) => MspDashError::Database("invalid UTF-8 returned from sqlite".into()),
            RE::InvalidQuery => MspDashError::Database("invalid SQL query".into()),
            other => MspDashError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_mspdash())
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → MspDashError */
/* -------------------------------------------------------------------------- */

impl IntoMspDashError for StorageError {
    fn into_mspdash(self) -> MspDashError {
        match self {
            StorageError::Rusqlite(err) => err.into_mspdash(),
            StorageError::WrongKeyOrNotEncrypted | StorageError::Encryption(_) => {
                MspDashError::Security(self.to_string())
            }
            StorageError::InvalidConfig(message) => MspDashError::Config(message),
            other => MspDashError::Database(other.to_string()),
        }
    }
}

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        match value.severity() {
            ErrorSeverity::Critical => error!(error = %value, "storage failure"),
            ErrorSeverity::Error | ErrorSeverity::Warning => {
                warn!(error = %value, retryable = value.is_retryable(), "storage failure")
            }
            ErrorSeverity::Info => {}
        }
        InfraError(value.into_mspdash())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use rusqlite::ffi::{Error as FfiError, ErrorCode};
    use rusqlite::Error as SqlError;

    use super::*;

    #[test]
    fn sqlite_busy_maps_to_database_error() {
        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::DatabaseBusy, extended_code: 5 },
            Some("database is locked".into()),
        );

        let mapped: MspDashError = InfraError::from(err).into();
        match mapped {
            MspDashError::Database(msg) => {
                assert!(msg.contains("busy") || msg.contains("locked"));
            }
            other => panic!("expected database error, got {:?}", other),
        }
    }

    #[test]
    fn wrong_key_maps_to_security_error() {
        let mapped: MspDashError = InfraError::from(StorageError::WrongKeyOrNotEncrypted).into();
        assert!(matches!(mapped, MspDashError::Security(_)));

        let err = SqlError::SqliteFailure(
            FfiError { code: ErrorCode::NotADatabase, extended_code: 26 },
            Some("file is not a database".into()),
        );
        let mapped: MspDashError = InfraError::from(err).into();
        assert!(matches!(mapped, MspDashError::Security(_)));
    }

    #[test]
    fn wrapped_rusqlite_error_keeps_its_classification() {
        let storage = StorageError::Rusqlite(SqlError::QueryReturnedNoRows);
        let mapped: MspDashError = InfraError::from(storage).into();
        assert!(matches!(mapped, MspDashError::NotFound(_)));
    }

    #[test]
    fn invalid_storage_config_maps_to_config_error() {
        let storage = StorageError::InvalidConfig("max_size must be between 1 and 100".into());
        let mapped: MspDashError = InfraError::from(storage).into();
        assert_eq!(mapped, MspDashError::Config("max_size must be between 1 and 100".into()));
    }
}
