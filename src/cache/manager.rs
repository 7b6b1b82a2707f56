//! Builds the configured store backend.

use std::sync::Arc;

use crate::cache::disk::DiskFeedStore;
use crate::cache::json_file::JsonFileFeedStore;
use crate::cache::memory::InMemoryFeedStore;
use crate::cache::{FeedStore, StoreError};
use crate::config::settings::{StoreBackend, StoreConfig};

/// Open the store selected by `config.backend`.
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn FeedStore>, StoreError> {
    let store: Arc<dyn FeedStore> = match config.backend {
        StoreBackend::JsonFile => Arc::new(JsonFileFeedStore::new(&config.json_file.path)?),
        StoreBackend::Disk => Arc::new(DiskFeedStore::new(
            &config.disk.directory,
            &config.disk.name,
        )?),
        StoreBackend::Memory => Arc::new(InMemoryFeedStore::new()),
    };

    tracing::debug!(backend = ?config.backend, "Opened feed store");
    Ok(store)
}
