//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for MspDash
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum MspDashError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),

    /// No client row exists for the requested account number.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// The client's `(plan, term)` pair has no billing plan row. Consumers
    /// render this as "plan not configured", never as a zero bill.
    #[error("Billing plan not configured: '{plan}' ({term})")]
    PlanNotConfigured { plan: String, term: String },
}

/// Result type alias for MspDash operations
pub type Result<T> = std::result::Result<T, MspDashError>;
