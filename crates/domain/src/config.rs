//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DASHBOARD_PAGE_SIZE;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub billing: BillingConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
    #[serde(default, skip_serializing)]
    pub encryption_key: Option<String>,
}

/// Billing and dashboard presentation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingConfig {
    /// Rows per dashboard page when the caller does not ask for a size.
    pub default_page_size: u32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self { default_page_size: DEFAULT_DASHBOARD_PAGE_SIZE }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "mspdash.db".to_string(),
                pool_size: 10,
                encryption_key: None,
            },
            billing: BillingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encryption_key_is_never_serialized() {
        let mut config = Config::default();
        config.database.encryption_key = Some("hunter2".into());

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("encryption_key"));
    }

    #[test]
    fn billing_section_is_optional() {
        let config: Config =
            serde_json::from_str(r#"{"database":{"path":"x.db","pool_size":2}}"#).unwrap();
        assert_eq!(config.billing, BillingConfig::default());
        assert!(config.database.encryption_key.is_none());
    }
}
