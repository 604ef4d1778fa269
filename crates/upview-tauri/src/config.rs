//! Application configuration.
//!
//! Resolved once at startup from the environment.

use std::path::PathBuf;
use std::time::Duration;

use upview_core::debounce::DEFAULT_DEBOUNCE;
use upview_core::{ClientConfig, Result};

/// Default directory for persisted data
const DEFAULT_DATA_DIR: &str = "upview-data";

/// File name of the favourites store inside the data directory
const FAVOURITES_FILE: &str = "favourites.json";

/// Everything the application root needs to build [`crate::AppState`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// OMDB client settings
    pub client: ClientConfig,
    /// Directory holding the favourites store
    pub data_dir: PathBuf,
    /// Quiet period before a typed query is submitted
    pub debounce: Duration,
}

impl AppConfig {
    /// Config with the given client settings and default paths.
    pub fn new(client: ClientConfig) -> Self {
        Self {
            client,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    /// Build from `OMDB_*` variables plus `UPVIEW_DATA_DIR`.
    ///
    /// # Errors
    /// `UpviewError::MissingApiKey` when `OMDB_API_KEY` is not set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(ClientConfig::from_env()?);
        if let Some(dir) = std::env::var_os("UPVIEW_DATA_DIR").filter(|d| !d.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    /// Path of the favourites store.
    pub fn favourites_path(&self) -> PathBuf {
        self.data_dir.join(FAVOURITES_FILE)
    }
}
