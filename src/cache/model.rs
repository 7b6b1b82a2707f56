//! Cache-side representation of the feed.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::feed::FeedItem;

/// Feed item as persisted by a store backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: String,
}

impl From<FeedItem> for LocalFeedItem {
    fn from(item: FeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.image_url,
        }
    }
}

impl From<LocalFeedItem> for FeedItem {
    fn from(item: LocalFeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            location: item.location,
            image_url: item.url,
        }
    }
}

/// The whole cache: every save replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFeed {
    pub feed: Vec<LocalFeedItem>,
    pub timestamp: Timestamp,
}
