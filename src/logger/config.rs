//! Runtime logger configuration

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::logger::error::LoggerError;

/// Output format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::format(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

/// Bare levels accepted by [`is_valid_level`]
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Accepts a bare level (case-insensitive) or a comma-separated directive
/// list such as `feed_cache=debug,warn`. A bare word that is not a level is
/// rejected rather than read as a target name.
pub fn is_valid_level(level: &str) -> bool {
    let level = level.trim();
    if LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        return true;
    }
    level.contains('=') && EnvFilter::try_new(level).is_ok()
}

/// Validated logger configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Filter directive, e.g. `info` or `feed_cache=debug,warn`
    pub level: String,
    pub format: LogFormat,
    /// Colour output; only honoured when stderr is a terminal
    pub colored: bool,
}

impl LoggerConfig {
    pub fn new(
        level: impl Into<String>,
        format: LogFormat,
        colored: bool,
    ) -> Result<Self, LoggerError> {
        let config = Self {
            level: level.into(),
            format,
            colored,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoggerError> {
        if self.level.trim().is_empty() {
            return Err(LoggerError::config("Log level must not be empty"));
        }
        if !is_valid_level(&self.level) {
            return Err(LoggerError::config(format!(
                "Invalid log level '{}'. Use one of {} or target=level directives",
                self.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }

    /// Build the `EnvFilter` for this level
    pub fn filter(&self) -> Result<EnvFilter, LoggerError> {
        EnvFilter::try_new(&self.level).map_err(|e| {
            LoggerError::config(format!("Invalid log level '{}': {}", self.level, e))
        })
    }

    /// Replace the level, as done by `--verbose` and `--quiet`
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            colored: true,
        }
    }
}
