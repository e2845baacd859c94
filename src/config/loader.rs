use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/clusterdeck/config.toml` on Unix/macOS, or the
    /// platform equivalent via `dirs::config_dir()`. Falls back to the
    /// current directory if no config dir is available.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("clusterdeck").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing file is not an error; the defaults point at a local
    /// scheduler instance.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// The base URL must be non-empty and carry an http(s) scheme; every
    /// resource URL and the unreachable-backend message interpolate it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.backend.default_base.trim();
        if base.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "backend.default_base must not be empty".to_string(),
            });
        }
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "backend.default_base '{}' must start with http:// or https://",
                    base
                ),
            });
        }
        Ok(())
    }
}
