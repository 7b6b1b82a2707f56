//! In-memory store holding the snapshot behind a mutex.

use std::sync::Mutex;

use jiff::Timestamp;

use crate::cache::{
    CachedFeed, DeletionCompletion, FeedStore, InsertionCompletion, LocalFeedItem,
    RetrievalCompletion, RetrievalOutcome, StoreError,
};

/// Non-persistent store. Completions run synchronously on the caller's thread.
#[derive(Default)]
pub struct InMemoryFeedStore {
    cache: Mutex<Option<CachedFeed>>,
}

impl InMemoryFeedStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_cache<T>(
        &self,
        f: impl FnOnce(&mut Option<CachedFeed>) -> T,
    ) -> Result<T, StoreError> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|e| StoreError::Operation(e.to_string()))?;
        Ok(f(&mut *cache))
    }
}

impl FeedStore for InMemoryFeedStore {
    fn delete_cached_feed(&self, completion: DeletionCompletion) {
        let result = self.with_cache(|cache| {
            cache.take();
        });
        completion(result);
    }

    fn insert(&self, feed: Vec<LocalFeedItem>, timestamp: Timestamp, completion: InsertionCompletion) {
        let result = self.with_cache(|cache| {
            *cache = Some(CachedFeed { feed, timestamp });
        });
        completion(result);
    }

    fn retrieve(&self, completion: RetrievalCompletion) {
        let result = self.with_cache(|cache| cache.clone());
        completion(RetrievalOutcome::from(result));
    }
}
