//! Runtime settings for the inventory store, read from the environment.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::storage::DEFAULT_INVENTORY_PATH;
use crate::store::DEFAULT_LOW_STOCK_THRESHOLD;

/// Overrides the inventory file location.
pub const PATH_ENV: &str = "STOCKPILE_INVENTORY_PATH";
/// Overrides the low-stock threshold (signed integer).
pub const THRESHOLD_ENV: &str = "STOCKPILE_LOW_STOCK_THRESHOLD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("STOCKPILE_LOW_STOCK_THRESHOLD must be an integer (got {value:?}): {source}")]
    InvalidThreshold {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("STOCKPILE_INVENTORY_PATH cannot be empty")]
    EmptyPath,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    pub path: PathBuf,
    pub low_stock_threshold: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INVENTORY_PATH),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl InventoryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match lookup(PATH_ENV) {
            Some(path) if path.trim().is_empty() => return Err(ConfigError::EmptyPath),
            Some(path) => config.path = PathBuf::from(path),
            None => tracing::debug!(
                path = DEFAULT_INVENTORY_PATH,
                "STOCKPILE_INVENTORY_PATH not set; using default inventory file"
            ),
        }

        if let Some(raw) = lookup(THRESHOLD_ENV) {
            config.low_stock_threshold = raw
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidThreshold { value: raw.clone(), source })?;
        }

        Ok(config)
    }
}
