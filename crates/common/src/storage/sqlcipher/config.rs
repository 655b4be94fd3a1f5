//! SQLCipher connection pool configuration

use std::time::Duration;

use crate::storage::error::{StorageError, StorageResult};

/// Pool sizing, timeouts and per-connection pragma switches
#[derive(Debug, Clone)]
pub struct SqlCipherPoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,

    /// How long to wait for a free connection
    pub connection_timeout: Duration,

    /// Busy timeout for SQLite lock contention
    pub busy_timeout: Duration,

    /// Enable WAL journal mode
    pub enable_wal: bool,

    /// Enable foreign key constraints
    pub enable_foreign_keys: bool,
}

impl Default for SqlCipherPoolConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5000),
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }
}

impl SqlCipherPoolConfig {
    /// Set the pool size, keeping at least one connection
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    /// Reject sizes and timeouts the pool cannot work with
    pub fn validate(&self) -> StorageResult<()> {
        if self.max_size == 0 || self.max_size > 100 {
            return Err(StorageError::InvalidConfig(format!(
                "max_size must be between 1 and 100, got {}",
                self.max_size
            )));
        }
        if self.connection_timeout.is_zero() || self.busy_timeout.is_zero() {
            return Err(StorageError::InvalidConfig("timeouts must be greater than 0".into()));
        }
        Ok(())
    }
}
