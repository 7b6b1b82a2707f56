use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single entry of the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedItem {
    pub id: Uuid,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub image_url: String,
}

impl FeedItem {
    pub fn new(
        id: Uuid,
        description: Option<String>,
        location: Option<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            description,
            location,
            image_url: image_url.into(),
        }
    }
}
