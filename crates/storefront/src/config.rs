//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPLITE_DATA_DIR` - Directory for the file-backed store (default: `shoplite-data`)
//! - `SHOPLITE_FEATURED_COUNT` - Products featured on the home page (default: 4)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = "shoplite-data";
const DEFAULT_FEATURED_COUNT: usize = 4;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory backing the file key-value store.
    pub data_dir: PathBuf,
    /// How many products the home page features.
    pub featured_count: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            featured_count: DEFAULT_FEATURED_COUNT,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_dir = PathBuf::from(get_env_or_default("SHOPLITE_DATA_DIR", DEFAULT_DATA_DIR));
        let featured_count = match std::env::var("SHOPLITE_FEATURED_COUNT") {
            Ok(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnvVar("SHOPLITE_FEATURED_COUNT".to_owned(), e.to_string())
            })?,
            Err(_) => DEFAULT_FEATURED_COUNT,
        };

        Ok(Self {
            data_dir,
            featured_count,
        })
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
