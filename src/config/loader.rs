//! Configuration loader for feed-cache
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "FEED_CACHE_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "FEED_CACHE_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "FEED_CACHE";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Deployment environment, naming the optional `{environment}.toml` layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl AppEnvironment {
    /// Variable selecting the environment
    pub const ENV_VAR: &'static str = "FEED_CACHE_APP_ENV";

    /// Unset or unrecognised values fall back to `Development`.
    pub fn from_env() -> Self {
        std::env::var(Self::ENV_VAR)
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Stem of the per-environment configuration file
    pub fn file_stem(self) -> &'static str {
        match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Test => "test",
            AppEnvironment::Staging => "staging",
            AppEnvironment::Production => "production",
        }
    }
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "development" | "dev" => Ok(AppEnvironment::Development),
            "test" => Ok(AppEnvironment::Test),
            "staging" | "stage" => Ok(AppEnvironment::Staging),
            "production" | "prod" => Ok(AppEnvironment::Production),
            _ => Err(ConfigError::UnknownEnvironment(value.to_string())),
        }
    }
}

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order of priority):
/// 1. `default.toml` - Base default configuration
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local overrides (optional)
/// 4. `FEED_CACHE_*` environment variables (highest priority)
///
/// `default.toml` is required when the directory was chosen explicitly through
/// `FEED_CACHE_CONFIG_DIR`. In the implicit `./config` directory every file is
/// optional and missing values fall back to built-in defaults.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// Explicit directory from `FEED_CACHE_CONFIG_DIR`
    explicit_dir: bool,
    /// Single configuration file (skips layered loading when set)
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if both `FEED_CACHE_CONFIG_DIR` and `FEED_CACHE_CONFIG_FILE`
    /// are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && dir_var.is_some() {
            return Err(ConfigError::ConflictingSources(
                "FEED_CACHE_CONFIG_DIR and FEED_CACHE_CONFIG_FILE cannot both be set. \
                 Use FEED_CACHE_CONFIG_DIR for layered configuration or \
                 FEED_CACHE_CONFIG_FILE for a single configuration file."
                    .to_string(),
            ));
        }

        Ok(Self {
            explicit_dir: dir_var.is_some(),
            config_dir: dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Create a loader reading a single configuration file
    ///
    /// Used for `--config FILE`; environment overrides still apply on top.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            explicit_dir: false,
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Load and validate configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a required file is missing
    /// - configuration parsing fails
    /// - configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::Parse(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            Self::add_file_source(builder, config_file, true)?
        } else {
            self.build_layered_config(builder)?
        };

        // FEED_CACHE_STORE__BACKEND -> store.backend
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, self.explicit_dir)?;

        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.file_stem()));
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.is_file() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    /// Environment variables with prefix `FEED_CACHE_` map onto configuration
    /// keys, `__` separating nested keys.
    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}
