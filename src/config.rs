//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CART_API_URL` - Catalog base URL (default: `http://localhost:3333`)
//! - `CART_STORAGE_DIR` - Directory holding the durable slot (default: `.cart`)
//! - `CART_STORAGE_KEY` - Slot key for the snapshot (default: `@RocketShoes:cart`)
//! - `CART_CHANNEL_CAPACITY` - Actor request buffer (default: 32)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

use crate::cart_actor::DEFAULT_BUFFER_SIZE;
use crate::storage::DEFAULT_CART_KEY;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_DIR: &str = ".cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Base URL of the stock and product endpoints
    pub api_url: Url,
    /// Directory for [`FileStorage`](crate::storage::FileStorage)
    pub storage_dir: PathBuf,
    /// Key the snapshot is saved under
    pub storage_key: String,
    /// Capacity of the actor's request channel
    pub channel_capacity: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_key: DEFAULT_CART_KEY.to_string(),
            channel_capacity: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let api_url = match lookup("CART_API_URL") {
            Some(raw) => Url::parse(&raw)
                .map_err(|e| ConfigError::InvalidEnvVar("CART_API_URL".to_string(), e.to_string()))?,
            None => defaults.api_url,
        };

        let storage_dir = lookup("CART_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage_dir);

        let storage_key = match lookup("CART_STORAGE_KEY") {
            Some(key) if key.is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "CART_STORAGE_KEY".to_string(),
                    "must not be empty".to_string(),
                ))
            }
            Some(key) => key,
            None => defaults.storage_key,
        };

        let channel_capacity = match lookup("CART_CHANNEL_CAPACITY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => {
                    return Err(ConfigError::InvalidEnvVar(
                        "CART_CHANNEL_CAPACITY".to_string(),
                        format!("expected a positive integer, got {raw:?}"),
                    ))
                }
            },
            None => defaults.channel_capacity,
        };

        Ok(Self {
            api_url,
            storage_dir,
            storage_key,
            channel_capacity,
        })
    }
}

fn default_api_url() -> Url {
    match Url::parse(DEFAULT_API_URL) {
        Ok(url) => url,
        Err(_) => unreachable!("default catalog URL is valid"),
    }
}
