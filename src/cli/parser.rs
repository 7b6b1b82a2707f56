//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::Url;

/// Inspect and maintain the local feed cache
#[derive(Parser, Debug)]
#[command(name = "feed-cache")]
#[command(about = "Inspect and maintain the local feed cache")]
#[command(long_about = "
feed-cache manages a locally cached image feed. The cache keeps the most
recently saved feed together with the time it was saved, and treats it as
stale once it is seven days old.

EXAMPLES:
    # Print the cached feed as JSON
    feed-cache load

    # Replace the cache with the items in a JSON file
    feed-cache save --input feed.json

    # Drop the cache if it is stale or unreadable
    feed-cache validate

    # Download the remote feed and cache it
    feed-cache fetch --url https://example.com/feed

    # Use a custom configuration file
    feed-cache --config /etc/feed-cache/config.toml load
")]
#[command(version = crate::build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load this TOML file instead of the layered files in ./config.
    /// FEED_CACHE_* environment variables still override its values.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    ///
    /// Raises the log level to debug. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers the log level to error. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the cached feed as a JSON array
    ///
    /// Prints an empty array when nothing is cached or the cache has expired.
    /// Never modifies the cache.
    Load,

    /// Replace the cached feed with the items in a JSON file
    ///
    /// The file must contain an array of feed items:
    ///   [{"id": "<uuid>", "description": "...", "location": "...", "image_url": "https://..."}]
    Save {
        /// JSON file holding the feed items
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },

    /// Delete the cache when it is expired or unreadable
    ///
    /// Prints the verdict: empty, valid, expired or corrupted.
    Validate,

    /// Download the remote feed and save it into the cache
    Fetch {
        /// Feed endpoint, overriding remote.url from the configuration
        #[arg(long, value_name = "URL", value_parser = super::validation::validate_url)]
        url: Option<Url>,
    },

    /// Delete the cached feed
    Clear,
}

impl Cli {
    /// Log level implied by the global flags, if any
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}
