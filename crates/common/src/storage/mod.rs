//! Encrypted storage primitives
//!
//! SQLCipher-backed r2d2 pool, per-connection pragmas, storage errors and
//! lock-free pool metrics.

pub mod error;
pub mod metrics;
pub mod sqlcipher;
pub mod types;

pub use error::{StorageError, StorageResult};
pub use metrics::StorageMetrics;
pub use sqlcipher::{
    apply_connection_pragmas, SqlCipherConnection, SqlCipherPool, SqlCipherPoolConfig,
};
pub use types::{HealthStatus, PoolMetrics};
