//! Catalog configuration.
//!
//! Values come from [`Default`], the environment, or a JSON document:
//!
//! ```json
//! { "history_limit": 250 }
//! ```
//!
//! ## Environment
//!
//! - `CATALOG_HISTORY_LIMIT` - number of loan records kept (default: 100, `0` disables history)

use std::{env, fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable holding the loan history limit
pub const HISTORY_LIMIT_VAR: &str = "CATALOG_HISTORY_LIMIT";

/// Default number of loan records kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Errors raised while loading a [`CatalogConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set to something that does not parse
    #[error("invalid value {value:?} for {var}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value found
        value: String,
    },

    /// The configuration file could not be read
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration document is not valid JSON for this type
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables of a [`crate::Catalog`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Maximum number of loan records kept; the oldest are dropped first
    pub history_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { history_limit: DEFAULT_HISTORY_LIMIT }
    }
}

impl CatalogConfig {
    /// Build a configuration from the process environment.
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build a configuration from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set but does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup(HISTORY_LIMIT_VAR) {
            config.history_limit = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { var: HISTORY_LIMIT_VAR, value: raw })?;
        }
        Ok(config)
    }

    /// Parse a configuration from a JSON document; missing fields keep their defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed JSON or unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents do not parse.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
