//! Behaviour every `FeedStore` backend must exhibit.
//!
//! Backends call these from their own test modules.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use jiff::{SignedDuration, Timestamp};
use uuid::Uuid;

use crate::cache::{FeedStore, LocalFeedItem, RetrievalOutcome, StoreError};

const TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn unique_local_feed() -> Vec<LocalFeedItem> {
    vec![
        LocalFeedItem {
            id: Uuid::new_v4(),
            description: Some("a description".to_string()),
            location: Some("a location".to_string()),
            url: "https://a-url.com".to_string(),
        },
        LocalFeedItem {
            id: Uuid::new_v4(),
            description: None,
            location: None,
            url: "https://another-url.com".to_string(),
        },
    ]
}

fn some_timestamp() -> Timestamp {
    Timestamp::from_second(1_700_000_000).unwrap()
}

pub(crate) fn retrieve(store: &dyn FeedStore) -> RetrievalOutcome {
    let (tx, rx) = mpsc::channel();
    store.retrieve(Box::new(move |outcome| tx.send(outcome).unwrap()));
    rx.recv_timeout(TIMEOUT).expect("retrieve did not complete")
}

pub(crate) fn insert(
    store: &dyn FeedStore,
    feed: Vec<LocalFeedItem>,
    timestamp: Timestamp,
) -> Result<(), StoreError> {
    let (tx, rx) = mpsc::channel();
    store.insert(feed, timestamp, Box::new(move |result| tx.send(result).unwrap()));
    rx.recv_timeout(TIMEOUT).expect("insert did not complete")
}

pub(crate) fn delete(store: &dyn FeedStore) -> Result<(), StoreError> {
    let (tx, rx) = mpsc::channel();
    store.delete_cached_feed(Box::new(move |result| tx.send(result).unwrap()));
    rx.recv_timeout(TIMEOUT).expect("delete did not complete")
}

pub(crate) fn assert_retrieve_delivers_empty_on_empty_cache(store: &dyn FeedStore) {
    assert_eq!(retrieve(store), RetrievalOutcome::Empty);
}

pub(crate) fn assert_retrieve_has_no_side_effects_on_empty_cache(store: &dyn FeedStore) {
    assert_eq!(retrieve(store), RetrievalOutcome::Empty);
    assert_eq!(retrieve(store), RetrievalOutcome::Empty);
}

pub(crate) fn assert_retrieve_delivers_found_values_on_non_empty_cache(store: &dyn FeedStore) {
    let feed = unique_local_feed();
    let timestamp = some_timestamp();

    insert(store, feed.clone(), timestamp).unwrap();

    assert_eq!(retrieve(store), RetrievalOutcome::Found { feed, timestamp });
}

/// `open` must return a fresh store over the same location on every call.
pub(crate) fn assert_retrieve_delivers_values_inserted_by_previous_instance<S: FeedStore>(
    open: impl Fn() -> S,
) {
    let feed = unique_local_feed();
    let timestamp = some_timestamp();

    let first = open();
    insert(&first, feed.clone(), timestamp).unwrap();
    drop(first);

    let second = open();
    assert_eq!(retrieve(&second), RetrievalOutcome::Found { feed, timestamp });
}

pub(crate) fn assert_retrieve_has_no_side_effects_on_non_empty_cache(store: &dyn FeedStore) {
    let feed = unique_local_feed();
    let timestamp = some_timestamp();

    insert(store, feed.clone(), timestamp).unwrap();

    let expected = RetrievalOutcome::Found { feed, timestamp };
    assert_eq!(retrieve(store), expected);
    assert_eq!(retrieve(store), expected);
}

pub(crate) fn assert_retrieve_delivers_failure(store: &dyn FeedStore) {
    assert!(matches!(retrieve(store), RetrievalOutcome::Failure(_)));
}

pub(crate) fn assert_retrieve_has_no_side_effects_on_failure(store: &dyn FeedStore) {
    let first = retrieve(store);
    let second = retrieve(store);

    assert!(matches!(first, RetrievalOutcome::Failure(_)));
    assert_eq!(first, second);
}

pub(crate) fn assert_insert_delivers_no_error_on_empty_cache(store: &dyn FeedStore) {
    assert_eq!(insert(store, unique_local_feed(), some_timestamp()), Ok(()));
}

pub(crate) fn assert_insert_delivers_no_error_on_non_empty_cache(store: &dyn FeedStore) {
    insert(store, unique_local_feed(), some_timestamp()).unwrap();

    assert_eq!(insert(store, unique_local_feed(), some_timestamp()), Ok(()));
}

pub(crate) fn assert_insert_overrides_previously_inserted_values(store: &dyn FeedStore) {
    insert(store, unique_local_feed(), some_timestamp()).unwrap();

    let latest_feed = unique_local_feed();
    let latest_timestamp = some_timestamp()
        .checked_add(SignedDuration::from_secs(60))
        .unwrap();
    insert(store, latest_feed.clone(), latest_timestamp).unwrap();

    assert_eq!(
        retrieve(store),
        RetrievalOutcome::Found {
            feed: latest_feed,
            timestamp: latest_timestamp,
        }
    );
}

pub(crate) fn assert_insert_delivers_error(store: &dyn FeedStore) {
    assert!(insert(store, unique_local_feed(), some_timestamp()).is_err());
}

pub(crate) fn assert_insert_has_no_side_effects_on_error(store: &dyn FeedStore) {
    let _ = insert(store, unique_local_feed(), some_timestamp());

    assert!(!matches!(retrieve(store), RetrievalOutcome::Found { .. }));
}

pub(crate) fn assert_delete_delivers_no_error_on_empty_cache(store: &dyn FeedStore) {
    assert_eq!(delete(store), Ok(()));
}

pub(crate) fn assert_delete_has_no_side_effects_on_empty_cache(store: &dyn FeedStore) {
    delete(store).unwrap();

    assert_eq!(retrieve(store), RetrievalOutcome::Empty);
}

pub(crate) fn assert_delete_empties_previously_inserted_cache(store: &dyn FeedStore) {
    insert(store, unique_local_feed(), some_timestamp()).unwrap();

    assert_eq!(delete(store), Ok(()));
    assert_eq!(retrieve(store), RetrievalOutcome::Empty);
}

pub(crate) fn assert_delete_delivers_error(store: &dyn FeedStore) {
    assert!(delete(store).is_err());
}

pub(crate) fn assert_side_effects_run_serially(store: &dyn FeedStore) {
    let completed = Arc::new(Mutex::new(Vec::new()));
    let (tx, rx) = mpsc::channel();

    let record = |label: &'static str| {
        let completed = Arc::clone(&completed);
        let tx = tx.clone();
        move |_: Result<(), StoreError>| {
            completed.lock().unwrap().push(label);
            tx.send(()).unwrap();
        }
    };

    store.insert(unique_local_feed(), some_timestamp(), Box::new(record("insert 1")));
    store.delete_cached_feed(Box::new(record("delete")));
    store.insert(unique_local_feed(), some_timestamp(), Box::new(record("insert 2")));

    for _ in 0..3 {
        rx.recv_timeout(TIMEOUT).expect("operation did not complete");
    }
    assert_eq!(
        *completed.lock().unwrap(),
        vec!["insert 1", "delete", "insert 2"]
    );
}
