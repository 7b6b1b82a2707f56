//! Configuration settings structures for feed-cache
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{LogFormat, LoggerConfig};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "feed-cache".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

fn default_true() -> bool {
    true
}

fn default_json_file_path() -> String {
    "cache/feed.json".to_string()
}

fn default_disk_directory() -> String {
    "cache".to_string()
}

fn default_disk_name() -> String {
    "feed-store".to_string()
}

fn default_remote_url() -> String {
    "https://example.com/feed".to_string()
}

fn default_remote_timeout() -> u64 {
    30
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Logger Configuration
// ============================================================================

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: "full", "compact", "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Use ANSI colours when writing to a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            colored: true,
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::Validation {
                field: "logger.format".to_string(),
                message: e.to_string(),
            })?;

        LoggerConfig::new(self.level, format, self.colored).map_err(|e| {
            ConfigError::Validation {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

// ============================================================================
// Store Configuration
// ============================================================================

/// Which [`FeedStore`](crate::cache::FeedStore) backend to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Single JSON document on disk
    #[default]
    JsonFile,
    /// Indexed record store on disk
    Disk,
    /// Process-local store, lost on exit
    Memory,
}

/// Flat-file backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonFileStoreConfig {
    /// Path of the JSON snapshot file
    #[serde(default = "default_json_file_path")]
    pub path: String,
}

impl Default for JsonFileStoreConfig {
    fn default() -> Self {
        Self {
            path: default_json_file_path(),
        }
    }
}

/// Structured backend configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskStoreConfig {
    /// Directory holding the store files
    #[serde(default = "default_disk_directory")]
    pub directory: String,

    /// Store name, used as the on-disk file prefix
    #[serde(default = "default_disk_name")]
    pub name: String,
}

impl Default for DiskStoreConfig {
    fn default() -> Self {
        Self {
            directory: default_disk_directory(),
            name: default_disk_name(),
        }
    }
}

/// Feed store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Selected backend
    #[serde(default)]
    pub backend: StoreBackend,

    #[serde(default)]
    pub json_file: JsonFileStoreConfig,

    #[serde(default)]
    pub disk: DiskStoreConfig,
}

// ============================================================================
// Remote Configuration
// ============================================================================

/// Remote feed endpoint configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Feed endpoint URL
    #[serde(default = "default_remote_url")]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_remote_timeout")]
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: default_remote_url(),
            timeout_seconds: default_remote_timeout(),
        }
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,

    /// Feed store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Remote feed endpoint
    #[serde(default)]
    pub remote: RemoteConfig,
}
