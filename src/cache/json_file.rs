//! Flat-file store: the whole cache as one JSON document.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::cache::queue::SerialQueue;
use crate::cache::{
    CachedFeed, DeletionCompletion, FeedStore, InsertionCompletion, LocalFeedItem,
    RetrievalCompletion, RetrievalOutcome, StoreError,
};

/// On-disk document layout.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    items: Vec<StoredFeedItem>,
    timestamp: Timestamp,
}

#[derive(Serialize, Deserialize)]
struct StoredFeedItem {
    id: uuid::Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    url: String,
}

impl From<LocalFeedItem> for StoredFeedItem {
    fn from(item: LocalFeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.url,
        }
    }
}

impl From<StoredFeedItem> for LocalFeedItem {
    fn from(item: StoredFeedItem) -> Self {
        Self {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.url,
        }
    }
}

/// Store backed by a single JSON file.
///
/// All file access happens on the store's own serial queue.
pub struct JsonFileFeedStore {
    path: PathBuf,
    queue: SerialQueue,
}

impl JsonFileFeedStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let queue = SerialQueue::new(format!("json-feed-store:{}", path.display()))?;
        Ok(Self { path, queue })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedStore for JsonFileFeedStore {
    fn delete_cached_feed(&self, completion: DeletionCompletion) {
        let path = self.path.clone();
        self.queue.dispatch(move || completion(remove_snapshot(&path)));
    }

    fn insert(&self, feed: Vec<LocalFeedItem>, timestamp: Timestamp, completion: InsertionCompletion) {
        let path = self.path.clone();
        self.queue
            .dispatch(move || completion(write_snapshot(&path, feed, timestamp)));
    }

    fn retrieve(&self, completion: RetrievalCompletion) {
        let path = self.path.clone();
        self.queue
            .dispatch(move || completion(RetrievalOutcome::from(read_snapshot(&path))));
    }
}

fn read_snapshot(path: &Path) -> Result<Option<CachedFeed>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::io("read feed snapshot", e)),
    };

    let snapshot: Snapshot =
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupted(e.to_string()))?;

    tracing::debug!(path = %path.display(), items = snapshot.items.len(), "Read feed snapshot");
    Ok(Some(CachedFeed {
        feed: snapshot.items.into_iter().map(LocalFeedItem::from).collect(),
        timestamp: snapshot.timestamp,
    }))
}

fn write_snapshot(
    path: &Path,
    feed: Vec<LocalFeedItem>,
    timestamp: Timestamp,
) -> Result<(), StoreError> {
    let snapshot = Snapshot {
        items: feed.into_iter().map(StoredFeedItem::from).collect(),
        timestamp,
    };
    let json = serde_json::to_vec(&snapshot)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io("create cache directory", e))?;
    }

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let write = || -> io::Result<()> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    };
    if let Err(e) = write() {
        let _ = fs::remove_file(&temp_path);
        return Err(StoreError::io("write feed snapshot", e));
    }

    tracing::debug!(path = %path.display(), items = snapshot.items.len(), "Wrote feed snapshot");
    Ok(())
}

fn remove_snapshot(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "Deleted feed snapshot");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::io("delete feed snapshot", e)),
    }
}
