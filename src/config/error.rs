//! Configuration error types

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or validating [`Settings`](super::Settings)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Required configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A loaded value is out of range or malformed
    #[error("Invalid value for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    /// Both a config directory and a single config file were requested
    #[error("Conflicting configuration sources: {0}")]
    ConflictingSources(String),

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
