//! FeedStore trait definition.

use jiff::Timestamp;

use crate::cache::{CachedFeed, LocalFeedItem, StoreError};

/// Result of reading the cache from a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetrievalOutcome {
    /// No snapshot is stored.
    Empty,
    /// A snapshot exists.
    Found {
        feed: Vec<LocalFeedItem>,
        timestamp: Timestamp,
    },
    /// The snapshot could not be read or decoded.
    Failure(StoreError),
}

impl From<Result<Option<CachedFeed>, StoreError>> for RetrievalOutcome {
    fn from(result: Result<Option<CachedFeed>, StoreError>) -> Self {
        match result {
            Ok(None) => RetrievalOutcome::Empty,
            Ok(Some(CachedFeed { feed, timestamp })) => RetrievalOutcome::Found { feed, timestamp },
            Err(error) => RetrievalOutcome::Failure(error),
        }
    }
}

pub type DeletionCompletion = Box<dyn FnOnce(Result<(), StoreError>) + Send + 'static>;
pub type InsertionCompletion = Box<dyn FnOnce(Result<(), StoreError>) + Send + 'static>;
pub type RetrievalCompletion = Box<dyn FnOnce(RetrievalOutcome) + Send + 'static>;

/// Persistence contract for the feed cache.
///
/// Every backend holds at most one snapshot. Completions are invoked exactly
/// once and may run on any thread; callers dispatch onward if they need to.
/// Operations requested on the same store complete in the order they were
/// requested.
pub trait FeedStore: Send + Sync {
    /// Remove the stored snapshot. Deleting an empty cache succeeds.
    fn delete_cached_feed(&self, completion: DeletionCompletion);

    /// Replace whatever is stored with `feed` captured at `timestamp`.
    fn insert(&self, feed: Vec<LocalFeedItem>, timestamp: Timestamp, completion: InsertionCompletion);

    /// Read the stored snapshot.
    fn retrieve(&self, completion: RetrievalCompletion);
}
