//! SQLCipher connection pool
//!
//! r2d2 pool whose connection initializer applies the SQLCipher key and the
//! connection pragmas before a connection is handed out.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info, instrument, warn};

use super::cipher::{configure_sqlcipher, verify_encryption, SqlCipherConfig, SqlCipherKey};
use super::config::SqlCipherPoolConfig;
use super::connection::SqlCipherConnection;
use super::pragmas::apply_connection_pragmas;
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::metrics::StorageMetrics;
use crate::storage::types::HealthStatus;

/// Pool of encrypted SQLite connections
#[derive(Debug)]
pub struct SqlCipherPool {
    pool: Pool<SqliteConnectionManager>,
    config: SqlCipherPoolConfig,
    metrics: Arc<StorageMetrics>,
}

impl SqlCipherPool {
    /// Open (or create) the database at `path` and build the pool.
    ///
    /// One connection is checked out immediately to verify that the key
    /// opens the file.
    ///
    /// # Errors
    /// [`StorageError::WrongKeyOrNotEncrypted`] when the key does not match,
    /// [`StorageError::InvalidConfig`] for an empty key or bad pool settings,
    /// and [`StorageError::Connection`] for anything else.
    #[instrument(skip(key), fields(db_path = ?path, pool_size = config.max_size))]
    pub fn new(
        path: &Path,
        key: SqlCipherKey,
        config: SqlCipherPoolConfig,
    ) -> StorageResult<Self> {
        if key.is_empty() {
            return Err(StorageError::InvalidConfig("encryption key must not be empty".into()));
        }
        config.validate()?;

        let metrics = Arc::new(StorageMetrics::new(config.max_size));
        let cipher_config = SqlCipherConfig::new(key);
        let pragma_config = config.clone();

        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            configure_sqlcipher(conn, &cipher_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            apply_connection_pragmas(conn, &pragma_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| {
                warn!("Failed to create connection pool: {}", e);
                classify_open_error(&e, "Failed to create pool")
            })?;

        {
            let conn = pool.get().map_err(|e| {
                warn!("Failed to get test connection: {}", e);
                classify_open_error(&e, "Failed to get test connection")
            })?;
            verify_encryption(&conn)?;
            debug!("Encryption verified");
        }

        info!("SQLCipher pool created with {} connections", config.max_size);
        Ok(Self { pool, config, metrics })
    }

    /// Check out a connection, recording acquisition time or failure.
    #[instrument(skip(self), fields(pool_size = self.config.max_size))]
    pub fn get_sqlcipher_connection(&self) -> StorageResult<SqlCipherConnection> {
        let start = Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                self.metrics.record_connection_acquired(duration_ms);
                debug!("Connection acquired in {}ms", duration_ms);
                Ok(SqlCipherConnection::new(conn))
            }
            Err(e) => {
                let message = e.to_string().to_lowercase();
                if message.contains("timed out") || message.contains("timeout") {
                    self.metrics.record_connection_timeout();
                    warn!("Connection timeout after {:?}", self.config.connection_timeout);
                    Err(StorageError::Timeout(self.config.connection_timeout.as_secs()))
                } else {
                    self.metrics.record_connection_error();
                    warn!("Connection error: {}", e);
                    Err(StorageError::Connection(format!("Failed to get connection: {}", e)))
                }
            }
        }
    }

    /// Report pool occupancy, or why a connection could not be used.
    pub fn health_check(&self) -> HealthStatus {
        let state = self.pool.state();

        match self.get_sqlcipher_connection() {
            Ok(conn) => match conn.query_row("SELECT 1", &[], |row| row.get::<_, i64>(0)) {
                Ok(_) => HealthStatus::healthy(
                    state.connections as usize,
                    state.idle_connections as usize,
                    self.config.max_size as usize,
                ),
                Err(e) => HealthStatus::unhealthy(format!("Probe query failed: {}", e)),
            },
            Err(e) => HealthStatus::unhealthy(format!("Pool unhealthy: {}", e)),
        }
    }

    /// Counters shared with callers that record query outcomes
    pub fn metrics(&self) -> &Arc<StorageMetrics> {
        &self.metrics
    }

    pub fn config(&self) -> &SqlCipherPoolConfig {
        &self.config
    }
}

fn classify_open_error(err: &r2d2::Error, context: &str) -> StorageError {
    if StorageError::looks_like_wrong_key(&err.to_string()) {
        StorageError::WrongKeyOrNotEncrypted
    } else {
        StorageError::Connection(format!("{}: {}", context, err))
    }
}
