// TOML config adapter - Loads the run configuration from TOML files

use std::path::{Path, PathBuf};

use crate::config::EncoderConfig;
use crate::error::{ReencodeError, ReencodeResult};

/// File looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "reencoder.toml";

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config_file_path: Option<PathBuf>,
}

impl TomlConfigAdapter {
    /// Adapter for an explicit config file, which must exist
    pub fn new(config_file_path: impl Into<PathBuf>) -> Self {
        Self {
            config_file_path: Some(config_file_path.into()),
        }
    }

    /// Adapter for `./reencoder.toml`, used only if present
    pub fn discover() -> Self {
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        Self {
            config_file_path: path.exists().then_some(path),
        }
    }

    pub fn config_file_path(&self) -> Option<&Path> {
        self.config_file_path.as_deref()
    }

    /// Load the configuration, falling back to defaults when there is no file
    pub fn load(&self) -> ReencodeResult<EncoderConfig> {
        let Some(path) = &self.config_file_path else {
            return Ok(EncoderConfig::default());
        };

        if !path.exists() {
            return Err(ReencodeError::ConfigError {
                message: format!("Config file does not exist: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ReencodeError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        Self::deserialize_config(&content)
    }

    /// Parse a TOML document; missing keys keep their defaults
    pub fn deserialize_config(toml_content: &str) -> ReencodeResult<EncoderConfig> {
        toml::from_str(toml_content).map_err(|e| ReencodeError::ConfigError {
            message: format!("Failed to parse TOML config: {}", e),
        })
    }

    /// Render a configuration as TOML
    pub fn serialize_config(config: &EncoderConfig) -> ReencodeResult<String> {
        toml::to_string_pretty(config).map_err(|e| ReencodeError::ConfigError {
            message: format!("Failed to serialize config: {}", e),
        })
    }
}
