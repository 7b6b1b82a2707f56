//! Loads the feed from the remote endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;

use super::{FeedItemMapper, HttpClient, RemoteError};
use crate::feed::{FeedError, FeedItem, FeedLoader};

pub struct RemoteFeedLoader {
    url: Url,
    client: Arc<dyn HttpClient>,
}

impl RemoteFeedLoader {
    pub fn new(url: Url, client: Arc<dyn HttpClient>) -> Self {
        Self { url, client }
    }

    /// Fetch and decode the feed. Transport failures map to `Connectivity`.
    pub async fn load(&self) -> Result<Vec<FeedItem>, RemoteError> {
        let response = self.client.get(&self.url).await.map_err(|e| {
            tracing::warn!(url = %self.url, error = %e, "Remote feed request failed");
            RemoteError::Connectivity
        })?;

        FeedItemMapper::map(&response.body, response.status)
    }
}

#[async_trait]
impl FeedLoader for RemoteFeedLoader {
    async fn load_feed(&self) -> Result<Vec<FeedItem>, FeedError> {
        Ok(self.load().await?)
    }
}
