//! SQLCipher key handling
//!
//! The key is applied with `PRAGMA key` as the first statement on every
//! connection and is wiped from memory when the config is dropped.

use std::fmt;

use rusqlite::Connection;
use tracing::{debug, error};
use zeroize::Zeroizing;

use crate::storage::error::{StorageError, StorageResult};

/// Database passphrase, zeroed on drop
#[derive(Clone)]
pub struct SqlCipherKey(Zeroizing<String>);

impl SqlCipherKey {
    /// Wrap a passphrase
    pub fn new(key: impl Into<String>) -> Self {
        Self(Zeroizing::new(key.into()))
    }

    /// Borrow the raw passphrase
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SqlCipherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SqlCipherKey(***)")
    }
}

/// SQLCipher configuration
#[derive(Debug, Clone)]
pub struct SqlCipherConfig {
    /// Encryption key
    pub key: SqlCipherKey,

    /// Cipher compatibility version (SQLCipher 4.x)
    pub cipher_compatibility: i32,

    /// KDF iterations for key derivation
    pub kdf_iter: i32,

    /// Wipe cipher buffers on free
    pub cipher_memory_security: bool,
}

impl SqlCipherConfig {
    /// Default SQLCipher 4 settings with the given key
    pub fn new(key: SqlCipherKey) -> Self {
        Self { key, cipher_compatibility: 4, kdf_iter: 256_000, cipher_memory_security: true }
    }

    pub fn with_kdf_iter(mut self, iterations: i32) -> Self {
        self.kdf_iter = iterations;
        self
    }
}

/// Apply the encryption pragmas to a freshly opened connection.
///
/// `PRAGMA key` must run before anything else touches the file.
pub fn configure_sqlcipher(conn: &Connection, config: &SqlCipherConfig) -> StorageResult<()> {
    let start = std::time::Instant::now();

    conn.pragma_update(None, "key", config.key.expose()).map_err(|e| {
        error!(error = %e, "SQLCipher key setup failed");
        if StorageError::looks_like_wrong_key(&e.to_string()) {
            StorageError::WrongKeyOrNotEncrypted
        } else {
            StorageError::Encryption(format!("Failed to set encryption key: {}", e))
        }
    })?;

    conn.pragma_update(None, "cipher_compatibility", config.cipher_compatibility).map_err(
        |e| StorageError::Encryption(format!("Failed to set cipher_compatibility: {}", e)),
    )?;

    conn.pragma_update(None, "kdf_iter", config.kdf_iter)
        .map_err(|e| StorageError::Encryption(format!("Failed to set kdf_iter: {}", e)))?;

    let memory_security = if config.cipher_memory_security { "ON" } else { "OFF" };
    conn.pragma_update(None, "cipher_memory_security", memory_security).map_err(|e| {
        StorageError::Encryption(format!("Failed to set cipher_memory_security: {}", e))
    })?;

    debug!(duration_ms = start.elapsed().as_millis(), "SQLCipher configured");
    Ok(())
}

/// Force a page read so a wrong key fails here rather than on first use.
pub fn verify_encryption(conn: &Connection) -> StorageResult<()> {
    let result = conn
        .query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
        .map(|_| ())
        .map_err(|e| {
            let message = e.to_string().to_lowercase();
            if StorageError::looks_like_wrong_key(&message)
                || message.contains("unsupported file format")
            {
                StorageError::WrongKeyOrNotEncrypted
            } else {
                StorageError::from(e)
            }
        });

    if let Err(e) = &result {
        error!(error = %e, "Encryption verification failed");
    }
    result
}
