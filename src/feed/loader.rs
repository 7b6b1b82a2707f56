use async_trait::async_trait;
use thiserror::Error;

use crate::cache::StoreError;
use crate::feed::FeedItem;
use crate::remote::RemoteError;

/// Errors surfaced by a [`FeedLoader`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Cache error: {0}")]
    Cache(#[from] StoreError),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),
}

/// Anything that can produce the current feed.
#[async_trait]
pub trait FeedLoader: Send + Sync {
    async fn load_feed(&self) -> Result<Vec<FeedItem>, FeedError>;
}
