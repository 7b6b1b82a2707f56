//! Configuration management for feed-cache
//!
//! Layered configuration loading with support for:
//! - TOML configuration files
//! - Environment variable overrides
//! - Per-environment files (development, test, staging, production)
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `FEED_CACHE_*` environment variables

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use error::ConfigError;
pub use loader::{AppEnvironment, ConfigLoader};
pub use settings::{LoggerSettings, RemoteConfig, Settings, StoreConfig};
