//! Feed domain types.
//!
//! `FeedItem` is the model shared by every loader, local or remote.

mod item;
mod loader;

pub use item::FeedItem;
pub use loader::{FeedError, FeedLoader};
