//! Maps the remote JSON payload into feed items.

use serde::Deserialize;
use uuid::Uuid;

use super::RemoteError;
use crate::feed::FeedItem;

const OK_200: u16 = 200;

#[derive(Deserialize)]
struct Root {
    items: Vec<RemoteFeedItem>,
}

#[derive(Deserialize)]
struct RemoteFeedItem {
    id: Uuid,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
    image: String,
}

impl From<RemoteFeedItem> for FeedItem {
    fn from(item: RemoteFeedItem) -> Self {
        FeedItem::new(item.id, item.description, item.location, item.image)
    }
}

/// Decodes `{ "items": [...] }` bodies of successful responses.
pub struct FeedItemMapper;

impl FeedItemMapper {
    pub fn map(body: &[u8], status: u16) -> Result<Vec<FeedItem>, RemoteError> {
        if status != OK_200 {
            return Err(RemoteError::InvalidData);
        }

        let root: Root = serde_json::from_slice(body).map_err(|_| RemoteError::InvalidData)?;
        Ok(root.items.into_iter().map(FeedItem::from).collect())
    }
}
