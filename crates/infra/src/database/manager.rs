//! Database connection manager backed by the shared SQLCipher pool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mspdash_common::storage::sqlcipher::{
    SqlCipherConnection, SqlCipherKey, SqlCipherPool, SqlCipherPoolConfig,
};
use mspdash_common::storage::{HealthStatus, StorageError};
use mspdash_domain::{MspDashError, Result};
use tracing::{debug, info, instrument};

use crate::errors::InfraError;

/// Version written to `schema_version` by [`DbManager::run_migrations`].
pub const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Database manager that wraps an [`SqlCipherPool`].
pub struct DbManager {
    pool: Arc<SqlCipherPool>,
    path: PathBuf,
}

impl DbManager {
    /// Create a new manager with the given pool size and SQLCipher key.
    pub fn new<P: AsRef<Path>>(
        db_path: P,
        pool_size: u32,
        encryption_key: Option<&str>,
    ) -> Result<Self> {
        let key = encryption_key
            .map(SqlCipherKey::new)
            .ok_or_else(|| MspDashError::Security("database encryption key not provided".into()))?;

        let path = db_path.as_ref().to_path_buf();
        let config = SqlCipherPoolConfig::default().with_max_size(pool_size);

        let pool = SqlCipherPool::new(&path, key, config).map(Arc::new).map_err(map_storage_error)?;

        info!(
            db_path = %path.display(),
            max_connections = pool.metrics().max_pool_size(),
            "sqlcipher pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Borrow the underlying SQLCipher pool.
    pub fn pool(&self) -> &Arc<SqlCipherPool> {
        &self.pool
    }

    /// Acquire a SQLCipher connection from the pool.
    pub fn get_connection(&self) -> Result<SqlCipherConnection> {
        self.pool.get_sqlcipher_connection().map_err(map_storage_error)
    }

    /// Run `f` on a pooled connection, counting the outcome in the pool
    /// metrics and tagging failures with `operation`.
    pub fn with_connection<T, F>(&self, operation: &'static str, f: F) -> Result<T>
    where
        F: FnOnce(&SqlCipherConnection) -> std::result::Result<T, StorageError>,
    {
        let conn = self.get_connection()?;
        let metrics = self.pool.metrics();

        match f(&conn) {
            Ok(value) => {
                metrics.record_query_executed();
                Ok(value)
            }
            Err(err) => {
                metrics.record_query_failed();
                debug!(operation, error = %err, "database operation failed");
                Err(map_storage_error(err))
            }
        }
    }

    /// Ensure the full schema exists on the current database.
    ///
    /// Safe to call on every startup. Fails if the file was written by a
    /// newer schema.
    #[instrument(skip(self), fields(db_path = %self.path.display()))]
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        create_schema(&conn).map_err(map_storage_error)?;
        info!(version = SCHEMA_VERSION, "database schema ready");
        Ok(())
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify that a connection can be acquired and answers a trivial query.
    pub fn health_check(&self) -> Result<HealthStatus> {
        let status = self.pool.health_check();
        if status.healthy {
            Ok(status)
        } else {
            Err(MspDashError::Database(
                status.message.unwrap_or_else(|| "database unhealthy".to_string()),
            ))
        }
    }
}

fn create_schema(conn: &SqlCipherConnection) -> std::result::Result<(), StorageError> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| StorageError::Migration(format!("failed to apply schema: {e}")))?;

    let found: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", &[], |row| row.get(0))?;
    if let Some(found) = found.filter(|found| *found > SCHEMA_VERSION) {
        return Err(StorageError::SchemaVersionMismatch { expected: SCHEMA_VERSION, found });
    }

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) \
         VALUES (?1, CAST(strftime('%s','now') AS INTEGER))",
        &[&SCHEMA_VERSION],
    )?;
    Ok(())
}

fn map_storage_error(err: StorageError) -> MspDashError {
    MspDashError::from(InfraError::from(err))
}
