//! # mag-config
//!
//! Layered configuration loading for magkit using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MAG_*` prefix, `__` as separator)
//! 2. Project-level `.magkit/config.toml`
//! 3. User-level `~/.config/magkit/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MAG_API__KEY` -> `api.key`, `MAG_OFFLINE__PORT` -> `offline.port`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use mag_config::MagConfig;
//!
//! let config = MagConfig::load_with_dotenv().expect("config");
//!
//! if config.api.is_configured() {
//!     println!("projects endpoint: {}", config.api.projects_url);
//! }
//! ```

mod api;
mod error;
mod offline;
mod storage;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use offline::OfflineConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MagConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub offline: OfflineConfig,
}

impl MagConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source is malformed or a value has
    /// the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing `.env` is fine.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".magkit/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("MAG_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("magkit").join("config.toml"))
    }
}
