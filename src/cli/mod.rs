//! CLI module for feed-cache
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command execution through the cache and fetch handlers

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands};

use crate::config::Settings;
use crate::error::AppResult;
use crate::logger::init_logger;

/// Load file and environment configuration, then apply CLI overrides
pub fn load_and_merge_config(cli: &Cli) -> AppResult<Settings> {
    let merger = ConfigurationMerger::from_config_path(cli.config.as_deref())?;
    Ok(merger.merge_cli_args(cli)?)
}

/// Install the global logger described by `settings`
pub fn init_logger_from_settings(settings: &Settings) -> AppResult<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;
    init_logger(logger_config)?;
    Ok(())
}
