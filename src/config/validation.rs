//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use reqwest::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{LoggerSettings, RemoteConfig, Settings, StoreBackend, StoreConfig};
use crate::logger::config::{LOG_LEVELS, is_valid_level};

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error, or a
    ///   directive list such as `feed_cache=debug,warn`
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_level(&self.level) {
            return Err(ConfigError::Validation {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}, or target=level directives",
                    self.level,
                    LOG_LEVELS.join(", ")
                ),
            });
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::Validation {
                field: "logger.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl StoreConfig {
    /// Validate store configuration
    ///
    /// Only the section of the selected backend is checked.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.backend {
            StoreBackend::JsonFile => {
                if self.json_file.path.trim().is_empty() {
                    return Err(ConfigError::validation(
                        "store.json_file.path",
                        "Snapshot path is required for the json_file backend.",
                    ));
                }
            }
            StoreBackend::Disk => {
                if self.disk.directory.trim().is_empty() {
                    return Err(ConfigError::validation(
                        "store.disk.directory",
                        "Store directory is required for the disk backend.",
                    ));
                }
                if self.disk.name.trim().is_empty() {
                    return Err(ConfigError::validation(
                        "store.disk.name",
                        "Store name is required for the disk backend.",
                    ));
                }
            }
            StoreBackend::Memory => {}
        }

        Ok(())
    }
}

impl RemoteConfig {
    /// Validate remote endpoint configuration
    ///
    /// # Validation Rules
    /// - URL must parse and use http or https
    /// - Timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        match Url::parse(&self.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Validation {
                    field: "remote.url".to_string(),
                    message: format!(
                        "Unsupported URL scheme '{}'. Expected http or https.",
                        url.scheme()
                    ),
                });
            }
            Err(e) => {
                return Err(ConfigError::Validation {
                    field: "remote.url".to_string(),
                    message: format!("Invalid URL '{}': {}", self.url, e),
                });
            }
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "remote.timeout_seconds",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }

    /// Parsed endpoint URL
    pub fn parsed_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.url).map_err(|e| ConfigError::Validation {
            field: "remote.url".to_string(),
            message: format!("Invalid URL '{}': {}", self.url, e),
        })
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.store.validate()?;
        self.remote.validate()?;
        Ok(())
    }
}
