//! Handler for the `fetch` command.

use std::sync::Arc;
use std::time::Duration;

use super::CacheCommandHandler;
use crate::config::Settings;
use crate::error::AppResult;
use crate::remote::{HttpClient, RemoteFeedLoader, ReqwestHttpClient};

/// Loads the remote feed and stores it in the local cache
pub struct FetchCommandHandler {
    remote: RemoteFeedLoader,
    cache: CacheCommandHandler,
}

impl FetchCommandHandler {
    pub fn new(remote: RemoteFeedLoader, cache: CacheCommandHandler) -> Self {
        Self { remote, cache }
    }

    /// Build the reqwest-backed loader for `settings.remote`
    pub fn from_settings(settings: &Settings, cache: CacheCommandHandler) -> AppResult<Self> {
        let url = settings.remote.parsed_url()?;
        let client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new(Duration::from_secs(
            settings.remote.timeout_seconds,
        ))?);

        Ok(Self::new(RemoteFeedLoader::new(url, client), cache))
    }

    /// Returns the number of items cached. The cache is untouched when the
    /// remote load fails.
    pub async fn execute(&self) -> AppResult<usize> {
        let feed = self.remote.load().await?;
        tracing::info!(items = feed.len(), "Fetched remote feed");
        self.cache.save_feed(feed).await
    }
}
