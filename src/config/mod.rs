//! Application configuration.
//!
//! Aggregates configuration from all modules into a single Config struct
//! that can be loaded from YAML files or environment variables.

mod api;

pub use api::{ApiConfig, DisplayConfig, DEFAULT_CURRENCY};

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "memberclaims.yaml";
/// Environment variable for configuration file path.
pub const CONFIG_ENV_VAR: &str = "MEMBERCLAIMS_CONFIG";
/// Prefix for configuration environment variables.
pub const CONFIG_ENV_PREFIX: &str = "MEMBERCLAIMS";
/// Environment variable for logging configuration.
pub const LOG_ENV_VAR: &str = "MEMBERCLAIMS_LOG";
/// Prefixed environment variable for the backend base URL.
pub const BASE_URL_ENV_VAR: &str = "MEMBERCLAIMS__API__BASE_URL";
/// Legacy environment variable for the backend base URL (dashboard build).
pub const LEGACY_API_URL_ENV_VAR: &str = "VITE_API_URL";
/// Environment variable for the member whose report is printed.
pub const USER_ID_ENV_VAR: &str = "MEMBERCLAIMS_USER_ID";

use serde::Deserialize;

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend API configuration.
    pub api: ApiConfig,
    /// Display formatting.
    pub display: DisplayConfig,
}

impl Config {
    /// Load configuration from file and environment.
    ///
    /// Configuration sources (in order of priority, later overrides earlier):
    /// 1. `memberclaims.yaml` in current directory (if exists)
    /// 2. File specified by `path` argument (if provided)
    /// 3. File specified by `CONFIG_ENV_VAR` environment variable (if set)
    /// 4. `VITE_API_URL` for the base URL (if set and the prefixed base URL is not)
    /// 5. Environment variables with `CONFIG_ENV_PREFIX` prefix
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn std::error::Error>> {
        use ::config::{Config as ConfigLib, Environment, File, FileFormat};

        let mut builder = ConfigLib::builder()
            .add_source(File::new(DEFAULT_CONFIG_FILE, FileFormat::Yaml).required(false));

        // Add config file from path argument if provided
        if let Some(config_path) = path {
            builder = builder.add_source(File::new(config_path, FileFormat::Yaml).required(true));
        }

        // Add config file from CONFIG_ENV_VAR env var if set
        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            builder = builder.add_source(File::new(&config_path, FileFormat::Yaml).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(CONFIG_ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut config: Config = config.try_deserialize()?;
        config.apply_legacy_env();
        Ok(config)
    }

    /// Honor `VITE_API_URL` unless the prefixed variable is set.
    fn apply_legacy_env(&mut self) {
        if std::env::var(BASE_URL_ENV_VAR).is_ok() {
            return;
        }
        if let Ok(url) = std::env::var(LEGACY_API_URL_ENV_VAR) {
            if !url.trim().is_empty() {
                self.api.base_url = url;
            }
        }
    }

    /// Create config for testing.
    pub fn for_test() -> Self {
        Self::default()
    }
}
