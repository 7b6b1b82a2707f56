//! Local feed cache.
//!
//! The cache holds exactly one snapshot of the feed. `LocalFeedLoader`
//! coordinates a pluggable [`FeedStore`] with the max-age policy:
//!
//! - JSON file store (single document, atomic replace)
//! - Disk store (sled-backed records, one per feed item)
//! - Memory store (in-process, not persisted)
//!
//! # Configuration
//!
//! ```toml
//! [store]
//! backend = "json_file"  # or "disk" or "memory"
//!
//! [store.json_file]
//! path = "cache/feed.json"
//!
//! [store.disk]
//! directory = "cache"
//! name = "feed-store"
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let store = open_store(&settings.store)?;
//! let loader = LocalFeedLoader::new(store, SystemClock);
//! loader.save_feed(items).await?;
//! let cached = loader.load_feed().await?;
//! ```

mod clock;
mod disk;
mod error;
mod json_file;
mod local_loader;
mod manager;
mod memory;
mod model;
pub mod policy;
mod queue;
mod traits;

#[cfg(test)]
mod specs;
#[cfg(test)]
mod spy;

pub use clock::{Clock, SystemClock};
pub use disk::DiskFeedStore;
pub use error::StoreError;
pub use json_file::JsonFileFeedStore;
pub use local_loader::{CacheValidation, LoadResult, LocalFeedLoader, SaveResult};
pub use manager::open_store;
pub use memory::InMemoryFeedStore;
pub use model::{CachedFeed, LocalFeedItem};
pub use traits::{
    DeletionCompletion, FeedStore, InsertionCompletion, RetrievalCompletion, RetrievalOutcome,
};

// Re-export config types
pub use crate::config::settings::{DiskStoreConfig, JsonFileStoreConfig, StoreBackend, StoreConfig};
