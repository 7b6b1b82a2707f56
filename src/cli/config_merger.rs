//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments override configuration file values.

use std::path::Path;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides on top of file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load the base configuration from `config_path`, or from the layered
    /// loader when no path is given
    pub fn from_config_path(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_path {
            Some(path) => ConfigLoader::from_file(path).load()?,
            None => ConfigLoader::new()?.load()?,
        };

        Ok(Self::new(config))
    }

    /// Merge CLI arguments with the base configuration and validate the result
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if let Some(level) = cli.log_level_override() {
            config.logger.level = level.to_string();
        }

        if let Commands::Fetch { url: Some(url) } = &cli.command {
            config.remote.url = url.to_string();
        }

        config.validate()?;

        Ok(config)
    }
}
