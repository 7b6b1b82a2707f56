//! Structured on-disk store backed by the `cached` sled disk cache.
//!
//! The cache is kept as a small object graph: one `ManagedCache` record that
//! owns the timestamp and the ordered keys of its `ManagedFeedItem` records.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use cached::IOCached;
use cached::stores::DiskCache as CachedDiskCache;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache::queue::SerialQueue;
use crate::cache::{
    CachedFeed, DeletionCompletion, FeedStore, InsertionCompletion, LocalFeedItem,
    RetrievalCompletion, RetrievalOutcome, StoreError,
};

const CACHE_KEY: &str = "feed_cache";
const ITEM_KEY_PREFIX: &str = "feed_item";

type Records = CachedDiskCache<String, Vec<u8>>;

#[derive(Serialize, Deserialize)]
struct ManagedCache {
    timestamp: Timestamp,
    feed: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct ManagedFeedItem {
    id: Uuid,
    description: Option<String>,
    location: Option<String>,
    url: String,
}

impl From<LocalFeedItem> for ManagedFeedItem {
    fn from(item: LocalFeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.url,
        }
    }
}

impl From<ManagedFeedItem> for LocalFeedItem {
    fn from(item: ManagedFeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.url,
        }
    }
}

/// Disk-based store with an indexed record per feed item.
pub struct DiskFeedStore {
    records: Arc<Mutex<Records>>,
    queue: SerialQueue,
}

impl DiskFeedStore {
    pub fn new(directory: impl AsRef<Path>, name: &str) -> Result<Self, StoreError> {
        let records = CachedDiskCache::new(name)
            .set_disk_directory(directory.as_ref())
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let queue = SerialQueue::new(format!("disk-feed-store:{name}"))?;

        Ok(Self {
            records: Arc::new(Mutex::new(records)),
            queue,
        })
    }

    /// Run `action` against the records on the store queue.
    fn perform<T: Send + 'static>(
        &self,
        action: impl FnOnce(&Records) -> Result<T, StoreError> + Send + 'static,
        completion: impl FnOnce(Result<T, StoreError>) + Send + 'static,
    ) {
        let records = Arc::clone(&self.records);
        self.queue.dispatch(move || {
            let result = lock(&records).and_then(|records| action(&*records));
            // Release the database before reporting so a dropped store can be reopened
            drop(records);
            completion(result);
        });
    }
}

impl FeedStore for DiskFeedStore {
    fn delete_cached_feed(&self, completion: DeletionCompletion) {
        self.perform(
            |records| {
                remove_graph(records)?;
                flush(records)
            },
            completion,
        );
    }

    fn insert(&self, feed: Vec<LocalFeedItem>, timestamp: Timestamp, completion: InsertionCompletion) {
        self.perform(
            move |records| {
                remove_graph(records)?;
                write_graph(records, feed, timestamp)?;
                flush(records)
            },
            completion,
        );
    }

    fn retrieve(&self, completion: RetrievalCompletion) {
        self.perform(fetch_graph, move |result| {
            completion(RetrievalOutcome::from(result))
        });
    }
}

fn lock(records: &Mutex<Records>) -> Result<MutexGuard<'_, Records>, StoreError> {
    records
        .lock()
        .map_err(|e| StoreError::Operation(e.to_string()))
}

fn operation_failed(error: impl ToString) -> StoreError {
    StoreError::Operation(error.to_string())
}

fn fetch_graph(records: &Records) -> Result<Option<CachedFeed>, StoreError> {
    let Some(bytes) = records
        .cache_get(&CACHE_KEY.to_string())
        .map_err(operation_failed)?
    else {
        return Ok(None);
    };
    let cache: ManagedCache =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupted(e.to_string()))?;

    let feed = cache
        .feed
        .iter()
        .map(|key| {
            let bytes = records
                .cache_get(key)
                .map_err(operation_failed)?
                .ok_or_else(|| StoreError::Corrupted(format!("missing feed item record {key}")))?;
            serde_json::from_slice::<ManagedFeedItem>(&bytes)
                .map(LocalFeedItem::from)
                .map_err(|e| StoreError::Corrupted(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(items = feed.len(), "Fetched feed cache records");
    Ok(Some(CachedFeed {
        feed,
        timestamp: cache.timestamp,
    }))
}

fn write_graph(
    records: &Records,
    feed: Vec<LocalFeedItem>,
    timestamp: Timestamp,
) -> Result<(), StoreError> {
    let mut keys = Vec::with_capacity(feed.len());
    for (position, item) in feed.into_iter().enumerate() {
        let key = format!("{ITEM_KEY_PREFIX}:{position:08}");
        let bytes = serde_json::to_vec(&ManagedFeedItem::from(item))?;
        records
            .cache_set(key.clone(), bytes)
            .map_err(operation_failed)?;
        keys.push(key);
    }

    let item_count = keys.len();
    let cache = ManagedCache {
        timestamp,
        feed: keys,
    };
    records
        .cache_set(CACHE_KEY.to_string(), serde_json::to_vec(&cache)?)
        .map_err(operation_failed)?;

    tracing::debug!(items = item_count, "Wrote feed cache records");
    Ok(())
}

/// Remove the cache record and every item record, including orphans left by
/// a corrupted cache record.
fn remove_graph(records: &Records) -> Result<(), StoreError> {
    let db = records.connection();
    let item_keys = db
        .scan_prefix(ITEM_KEY_PREFIX)
        .keys()
        .collect::<Result<Vec<_>, _>>()
        .map_err(operation_failed)?;
    for key in item_keys {
        db.remove(key).map_err(operation_failed)?;
    }

    records
        .cache_remove(&CACHE_KEY.to_string())
        .map_err(operation_failed)?;
    Ok(())
}

fn flush(records: &Records) -> Result<(), StoreError> {
    records
        .connection()
        .flush()
        .map(|_| ())
        .map_err(operation_failed)
}
