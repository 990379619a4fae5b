use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::LauncherConfig;

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

impl LauncherConfig {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/acclaunch/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("acclaunch").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `LauncherConfig::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(LauncherConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: LauncherConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - The bootstrap archive path is not empty
    /// - Every suffix starts with a dot
    /// - At least one runtime layout is configured
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bootstrap_archive.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "bootstrap_archive must not be empty".to_string(),
            });
        }

        let suffixes = std::iter::once(&self.class_file_suffix)
            .chain(self.secondary_archive_suffixes.iter());
        for suffix in suffixes {
            if !suffix.starts_with('.') || suffix.len() < 2 {
                return Err(ConfigError::ValidationError {
                    message: format!("Suffix '{}' must start with '.'", suffix),
                });
            }
        }

        if self.runtime_layouts.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one runtime layout must be configured".to_string(),
            });
        }

        Ok(())
    }
}
