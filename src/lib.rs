//! Feed-cache library
//!
//! Local feed caching with a seven-day expiry policy, pluggable store
//! backends and a remote feed loader.

use shadow_rs::shadow;
shadow!(build);

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod logger;
pub mod remote;

pub use cache::{FeedStore, LocalFeedLoader};
pub use feed::{FeedItem, FeedLoader};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}
