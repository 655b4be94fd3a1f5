//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `MSPDASH_DB_PATH` is unset, falls back to loading from file
//! 3. Probes multiple paths for config files (JSON or TOML)
//!
//! ## Environment Variables
//! - `MSPDASH_DB_PATH`: Database file path (required)
//! - `MSPDASH_DB_POOL_SIZE`: Connection pool size (default 10)
//! - `MSPDASH_DB_ENCRYPTION_KEY`: SQLCipher key
//! - `MSPDASH_PAGE_SIZE`: Default dashboard page size (default 50)
//!
//! ## File Locations
//! `config.{json,toml}` and `mspdash.{json,toml}` in the working directory,
//! its parent and grandparent, then the same names next to the executable.
//! A file without an `encryption_key` picks it up from the environment.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use mspdash_common::CommonError;
use mspdash_domain::constants::{DEFAULT_DASHBOARD_PAGE_SIZE, MAX_DASHBOARD_PAGE_SIZE};
use mspdash_domain::{BillingConfig, Config, DatabaseConfig, MspDashError, Result};
use tracing::{debug, info};

const ENV_DB_PATH: &str = "MSPDASH_DB_PATH";
const ENV_DB_POOL_SIZE: &str = "MSPDASH_DB_POOL_SIZE";
const ENV_DB_ENCRYPTION_KEY: &str = "MSPDASH_DB_ENCRYPTION_KEY";
const ENV_PAGE_SIZE: &str = "MSPDASH_PAGE_SIZE";

const DEFAULT_POOL_SIZE: u32 = 10;
const CONFIG_FILE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "mspdash.json", "mspdash.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `MspDashError::Config` if neither source yields a valid config.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            info!("configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            debug!(error = %e, "environment configuration incomplete, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from `MSPDASH_*` environment variables
///
/// # Errors
/// Returns `MspDashError::Config` if `MSPDASH_DB_PATH` is missing or a
/// numeric variable does not parse or is out of range.
pub fn load_from_env() -> Result<Config> {
    let path = std::env::var(ENV_DB_PATH).map_err(|_| {
        MspDashError::Config(format!("Missing required environment variable: {ENV_DB_PATH}"))
    })?;

    let config = Config {
        database: DatabaseConfig {
            path,
            pool_size: env_parse(ENV_DB_POOL_SIZE, DEFAULT_POOL_SIZE)?,
            encryption_key: env_encryption_key(),
        },
        billing: BillingConfig {
            default_page_size: env_parse(ENV_PAGE_SIZE, DEFAULT_DASHBOARD_PAGE_SIZE)?,
        },
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations via
/// [`probe_config_paths`]. Format is chosen by extension.
///
/// # Errors
/// Returns `MspDashError::Config` if the file is missing, malformed or
/// fails validation.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) if p.exists() => p,
        Some(p) => {
            return Err(MspDashError::Config(format!("Config file not found: {}", p.display())))
        }
        None => probe_config_paths().ok_or_else(|| {
            MspDashError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    info!(path = %config_path.display(), "loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MspDashError::Config(format!("Failed to read config file: {e}")))?;

    let mut config = parse_config(&contents, &config_path)?;
    if config.database.encryption_key.is_none() {
        config.database.encryption_key = env_encryption_key();
    }

    validate(&config)?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MspDashError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MspDashError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(MspDashError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe the standard locations for a configuration file
///
/// Returns the first existing candidate, or `None`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    candidate_paths(&roots).into_iter().find(|path| path.exists())
}

fn candidate_paths(roots: &[PathBuf]) -> Vec<PathBuf> {
    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .collect()
}

fn validate(config: &Config) -> Result<()> {
    if config.database.path.trim().is_empty() {
        return Err(config_error("database.path", "database path must not be empty"));
    }
    if config.database.pool_size == 0 {
        return Err(config_error("database.pool_size", "pool size must be at least 1"));
    }
    let page_size = config.billing.default_page_size;
    if page_size == 0 || page_size > MAX_DASHBOARD_PAGE_SIZE {
        return Err(config_error(
            "billing.default_page_size",
            &format!("page size must be between 1 and {MAX_DASHBOARD_PAGE_SIZE}"),
        ));
    }
    Ok(())
}

fn config_error(field: &str, message: &str) -> MspDashError {
    MspDashError::Config(CommonError::config_field(field, message).to_string())
}

fn env_encryption_key() -> Option<String> {
    std::env::var(ENV_DB_ENCRYPTION_KEY).ok().filter(|key| !key.trim().is_empty())
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| MspDashError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}
