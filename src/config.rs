//! Configuration Module
//!
//! This module defines the economic parameters of the ledger.
//! Configuration is loaded from TOML files and parsed using serde.

use crate::Satoshi;
use serde::Deserialize;
use std::fs;

/// Main configuration structure
///
/// Loaded from a TOML file (e.g., config/default.toml).
///
/// # Example TOML
/// ```toml
/// [ledger]
/// reward_per_block = 1000
/// max_transactions_per_block = 10
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Ledger economics
///
/// # Fields
/// - `reward_per_block`: Amount created for the miner of every block, including empty ones
/// - `max_transactions_per_block`: Upper bound on transactions a block may carry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub reward_per_block: Satoshi,
    pub max_transactions_per_block: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            reward_per_block: 1000,
            max_transactions_per_block: 10,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    ///
    /// # Example
    /// ```no_run
    /// use ledger_validator::Config;
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [ledger]
            reward_per_block = 50
            max_transactions_per_block = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.ledger.reward_per_block, 50);
        assert_eq!(config.ledger.max_transactions_per_block, 4);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config = Config::parse("[ledger]\nreward_per_block = 7\n").unwrap();
        assert_eq!(config.ledger.reward_per_block, 7);
        assert_eq!(config.ledger.max_transactions_per_block, 10);

        let config = Config::parse("").unwrap();
        assert_eq!(config.ledger, LedgerConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::parse("[ledger]\nreward_per_block = \"lots\"\n").is_err());
    }

    #[test]
    fn test_load_default_config_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        let config = Config::load(path).unwrap();
        assert_eq!(config.ledger, LedgerConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(Config::load("config/does-not-exist.toml").is_err());
    }
}
