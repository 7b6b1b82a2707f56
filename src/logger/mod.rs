//! Logger setup
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a single
//! fmt layer writing to stderr in full, compact or JSON format. Stdout is left
//! to command output.

pub mod config;
pub mod error;

pub use config::{LogFormat, LoggerConfig};
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global logger with the given configuration
pub fn init_logger(config: LoggerConfig) -> Result<(), LoggerError> {
    config.validate()?;

    let filter = config.filter()?;
    let use_ansi = config.colored && std::io::stderr().is_terminal();

    let result = match config.format {
        LogFormat::Full => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .with_level(true),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .json(),
            )
            .try_init(),
    };

    result.map_err(|e| LoggerError::Install(e.to_string()))
}
