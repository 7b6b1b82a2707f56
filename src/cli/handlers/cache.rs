//! Handler for the commands that work on the local cache only.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::cache::{
    CacheValidation, Clock, FeedStore, LocalFeedLoader, StoreError, SystemClock, open_store,
};
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::feed::{FeedItem, FeedLoader};

/// Runs `load`, `save`, `validate` and `clear` against the configured store
pub struct CacheCommandHandler {
    store: Arc<dyn FeedStore>,
    loader: LocalFeedLoader,
}

impl CacheCommandHandler {
    pub fn new(store: Arc<dyn FeedStore>, clock: impl Clock + 'static) -> Self {
        let loader = LocalFeedLoader::new(store.clone(), clock);
        Self { store, loader }
    }

    /// Open the store selected in `settings` using the system clock
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let store = open_store(&settings.store).map_err(|e| AppError::cache("open", e))?;
        Ok(Self::new(store, SystemClock))
    }

    /// Cached feed, or an empty feed when nothing valid is cached
    pub async fn load(&self) -> AppResult<Vec<FeedItem>> {
        Ok(self.loader.load_feed().await?)
    }

    /// Replace the cache with the feed stored in the JSON file at `input`
    pub async fn save(&self, input: &Path) -> AppResult<usize> {
        let bytes = tokio::fs::read(input)
            .await
            .map_err(|e| AppError::input(input, e))?;
        let feed: Vec<FeedItem> =
            serde_json::from_slice(&bytes).map_err(|e| AppError::input(input, e))?;

        self.save_feed(feed).await
    }

    pub async fn save_feed(&self, feed: Vec<FeedItem>) -> AppResult<usize> {
        let count = feed.len();
        self.loader
            .save_feed(feed)
            .await
            .map_err(|e| AppError::cache("save", e))?;
        tracing::info!(items = count, "Saved feed to cache");
        Ok(count)
    }

    pub async fn validate(&self) -> AppResult<CacheValidation> {
        let verdict = self
            .loader
            .validate_cache_async()
            .await
            .map_err(|e| AppError::cache("validate", e))?;
        tracing::info!(?verdict, "Validated feed cache");
        Ok(verdict)
    }

    pub async fn clear(&self) -> AppResult<()> {
        let (tx, rx) = oneshot::channel();
        self.store.delete_cached_feed(Box::new(move |result| {
            let _ = tx.send(result);
        }));

        rx.await
            .unwrap_or(Err(StoreError::Closed))
            .map_err(|e| AppError::cache("clear", e))?;
        tracing::info!("Cleared feed cache");
        Ok(())
    }
}
