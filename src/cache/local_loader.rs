//! Local feed loader coordinating a `FeedStore` with the cache policy.

use std::sync::{Arc, Weak};

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::cache::{Clock, FeedStore, LocalFeedItem, RetrievalOutcome, StoreError, policy};
use crate::feed::{FeedError, FeedItem, FeedLoader};

pub type SaveResult = Result<(), StoreError>;
pub type LoadResult = Result<Vec<FeedItem>, StoreError>;

/// Verdict reached by [`LocalFeedLoader::validate_cache_then`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheValidation {
    /// Nothing is cached.
    Empty,
    /// The cached feed is within its max age and was kept.
    Valid,
    /// The cached feed was too old; deletion was requested.
    Expired,
    /// The cache could not be read; deletion was requested.
    Corrupted,
}

impl CacheValidation {
    fn requires_deletion(self) -> bool {
        matches!(self, CacheValidation::Expired | CacheValidation::Corrupted)
    }
}

struct Inner {
    store: Arc<dyn FeedStore>,
    clock: Box<dyn Clock>,
}

/// Saves, loads and validates the cached feed.
///
/// Completions handed to the store only hold weak references to the loader.
/// Once the loader is dropped, store callbacks still in flight are ignored and
/// the caller's completion never fires.
pub struct LocalFeedLoader {
    inner: Arc<Inner>,
}

impl LocalFeedLoader {
    pub fn new(store: Arc<dyn FeedStore>, clock: impl Clock + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                clock: Box::new(clock),
            }),
        }
    }

    /// Replace the cached feed: delete, then insert with the current time.
    ///
    /// No insert is attempted when deletion fails. Ordering is guaranteed per
    /// store operation only: the insert is issued from the delete completion,
    /// so store calls made in the meantime may run between the two.
    pub fn save(&self, feed: Vec<FeedItem>, completion: impl FnOnce(SaveResult) + Send + 'static) {
        let this = Arc::downgrade(&self.inner);
        self.inner
            .store
            .delete_cached_feed(Box::new(move |deletion| {
                let Some(inner) = this.upgrade() else {
                    return;
                };
                match deletion {
                    Ok(()) => insert_feed(&inner, feed, completion),
                    Err(e) => {
                        tracing::warn!(error = %e, "Cache deletion failed, feed not saved");
                        completion(Err(e));
                    }
                }
            }));
    }

    /// Deliver the cached feed while it is within its max age, otherwise an
    /// empty feed. Never modifies the store.
    pub fn load(&self, completion: impl FnOnce(LoadResult) + Send + 'static) {
        let this = Arc::downgrade(&self.inner);
        self.inner.store.retrieve(Box::new(move |outcome| {
            let Some(inner) = this.upgrade() else {
                return;
            };
            let result = match outcome {
                RetrievalOutcome::Failure(e) => {
                    tracing::warn!(error = %e, "Cache retrieval failed");
                    Err(e)
                }
                RetrievalOutcome::Found { feed, timestamp }
                    if policy::is_valid(timestamp, inner.clock.now()) =>
                {
                    Ok(feed.into_iter().map(FeedItem::from).collect())
                }
                RetrievalOutcome::Found { .. } | RetrievalOutcome::Empty => Ok(Vec::new()),
            };
            completion(result);
        }));
    }

    /// Delete the cache when it is expired or unreadable.
    pub fn validate_cache(&self) {
        self.validate_cache_then(|_| {});
    }

    /// Like [`validate_cache`](Self::validate_cache), reporting the verdict once
    /// any requested deletion has completed. Deletion errors are logged only.
    pub fn validate_cache_then(
        &self,
        completion: impl FnOnce(CacheValidation) + Send + 'static,
    ) {
        let this = Arc::downgrade(&self.inner);
        self.inner.store.retrieve(Box::new(move |outcome| {
            let Some(inner) = this.upgrade() else {
                return;
            };
            let verdict = match outcome {
                RetrievalOutcome::Failure(e) => {
                    tracing::warn!(error = %e, "Unreadable feed cache, deleting");
                    CacheValidation::Corrupted
                }
                RetrievalOutcome::Found { timestamp, .. }
                    if !policy::is_valid(timestamp, inner.clock.now()) =>
                {
                    tracing::info!(%timestamp, "Feed cache expired, deleting");
                    CacheValidation::Expired
                }
                RetrievalOutcome::Found { .. } => CacheValidation::Valid,
                RetrievalOutcome::Empty => CacheValidation::Empty,
            };

            if !verdict.requires_deletion() {
                completion(verdict);
                return;
            }

            let this = Arc::downgrade(&inner);
            inner.store.delete_cached_feed(Box::new(move |deletion| {
                if let Err(e) = deletion {
                    tracing::warn!(error = %e, "Failed to delete invalid feed cache");
                }
                if this.upgrade().is_some() {
                    completion(verdict);
                }
            }));
        }));
    }

    /// Async form of [`save`](Self::save).
    pub async fn save_feed(&self, feed: Vec<FeedItem>) -> SaveResult {
        let (tx, rx) = oneshot::channel();
        self.save(feed, move |result| {
            let _ = tx.send(result);
        });
        rx.await.unwrap_or(Err(StoreError::Closed))
    }

    /// Async form of [`validate_cache_then`](Self::validate_cache_then).
    pub async fn validate_cache_async(&self) -> Result<CacheValidation, StoreError> {
        let (tx, rx) = oneshot::channel();
        self.validate_cache_then(move |verdict| {
            let _ = tx.send(verdict);
        });
        rx.await.map_err(|_| StoreError::Closed)
    }
}

fn insert_feed(
    inner: &Arc<Inner>,
    feed: Vec<FeedItem>,
    completion: impl FnOnce(SaveResult) + Send + 'static,
) {
    let this: Weak<Inner> = Arc::downgrade(inner);
    let feed: Vec<LocalFeedItem> = feed.into_iter().map(LocalFeedItem::from).collect();
    let timestamp = inner.clock.now();

    tracing::debug!(items = feed.len(), %timestamp, "Inserting feed into cache");
    inner.store.insert(
        feed,
        timestamp,
        Box::new(move |insertion| {
            if this.upgrade().is_none() {
                return;
            }
            if let Err(e) = &insertion {
                tracing::warn!(error = %e, "Cache insertion failed");
            }
            completion(insertion);
        }),
    );
}

#[async_trait]
impl FeedLoader for LocalFeedLoader {
    async fn load_feed(&self) -> Result<Vec<FeedItem>, FeedError> {
        let (tx, rx) = oneshot::channel();
        self.load(move |result| {
            let _ = tx.send(result);
        });
        Ok(rx.await.unwrap_or(Err(StoreError::Closed))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::spy::{FeedStoreSpy, ReceivedMessage};
    use jiff::{SignedDuration, Timestamp};
    use std::sync::Mutex;
    use uuid::Uuid;

    fn max_age() -> SignedDuration {
        SignedDuration::from_hours(7 * 24)
    }

    fn fixed_now() -> Timestamp {
        Timestamp::from_second(1_700_000_000).unwrap()
    }

    fn make_sut_at(now: Timestamp) -> (LocalFeedLoader, Arc<FeedStoreSpy>) {
        let store = Arc::new(FeedStoreSpy::default());
        let sut = LocalFeedLoader::new(store.clone(), move || now);
        (sut, store)
    }

    fn make_sut() -> (LocalFeedLoader, Arc<FeedStoreSpy>) {
        make_sut_at(fixed_now())
    }

    fn unique_item() -> FeedItem {
        FeedItem::new(
            Uuid::new_v4(),
            Some("a description".to_string()),
            None,
            "https://a-url.com",
        )
    }

    fn unique_feed() -> (Vec<FeedItem>, Vec<LocalFeedItem>) {
        let models = vec![unique_item(), unique_item()];
        let local = models.iter().cloned().map(LocalFeedItem::from).collect();
        (models, local)
    }

    fn any_error() -> StoreError {
        StoreError::Operation("any error".to_string())
    }

    fn found(feed: Vec<LocalFeedItem>, timestamp: Timestamp) -> RetrievalOutcome {
        RetrievalOutcome::Found { feed, timestamp }
    }

    /// Collects every value passed to the returned completion.
    fn capture<T: Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl FnOnce(T) + Send + 'static) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        (received, move |value| sink.lock().unwrap().push(value))
    }

    #[test]
    fn test_new_does_not_message_store() {
        let (_sut, store) = make_sut();
        assert!(store.received_messages().is_empty());
    }

    // ========================================================================
    // save
    // ========================================================================

    #[test]
    fn test_save_requests_cache_deletion() {
        let (sut, store) = make_sut();

        sut.save(unique_feed().0, |_| {});

        assert_eq!(store.received_messages(), vec![ReceivedMessage::DeleteCachedFeed]);
    }

    #[test]
    fn test_save_does_not_request_insertion_on_deletion_error() {
        let (sut, store) = make_sut();

        sut.save(unique_feed().0, |_| {});
        store.complete_deletion(Err(any_error()), 0);

        assert_eq!(store.received_messages(), vec![ReceivedMessage::DeleteCachedFeed]);
    }

    #[test]
    fn test_save_requests_insertion_with_timestamp_on_successful_deletion() {
        let (models, local) = unique_feed();
        let (sut, store) = make_sut();

        sut.save(models, |_| {});
        store.complete_deletion(Ok(()), 0);

        assert_eq!(
            store.received_messages(),
            vec![
                ReceivedMessage::DeleteCachedFeed,
                ReceivedMessage::Insert(local, fixed_now()),
            ]
        );
    }

    #[test]
    fn test_save_issues_insertion_only_from_its_deletion_completion() {
        let (first, first_local) = unique_feed();
        let (second, second_local) = unique_feed();
        let (sut, store) = make_sut();

        sut.save(first, |_| {});
        sut.save(second, |_| {});
        store.complete_deletion(Ok(()), 1);
        store.complete_deletion(Ok(()), 0);

        assert_eq!(
            store.received_messages(),
            vec![
                ReceivedMessage::DeleteCachedFeed,
                ReceivedMessage::DeleteCachedFeed,
                ReceivedMessage::Insert(second_local, fixed_now()),
                ReceivedMessage::Insert(first_local, fixed_now()),
            ]
        );
    }

    #[test]
    fn test_save_reads_clock_when_inserting() {
        let (models, local) = unique_feed();
        let store = Arc::new(FeedStoreSpy::default());
        let clock_time = Arc::new(Mutex::new(fixed_now()));
        let clock = {
            let clock_time = Arc::clone(&clock_time);
            move || *clock_time.lock().unwrap()
        };
        let sut = LocalFeedLoader::new(store.clone(), clock);

        sut.save(models, |_| {});
        let later = fixed_now().checked_add(SignedDuration::from_secs(30)).unwrap();
        *clock_time.lock().unwrap() = later;
        store.complete_deletion(Ok(()), 0);

        assert_eq!(
            store.received_messages()[1],
            ReceivedMessage::Insert(local, later)
        );
    }

    #[test]
    fn test_save_fails_on_deletion_error() {
        let (sut, store) = make_sut();
        let (received, completion) = capture::<SaveResult>();

        sut.save(unique_feed().0, completion);
        store.complete_deletion(Err(any_error()), 0);

        assert_eq!(*received.lock().unwrap(), vec![Err(any_error())]);
    }

    #[test]
    fn test_save_fails_on_insertion_error() {
        let (sut, store) = make_sut();
        let (received, completion) = capture::<SaveResult>();

        sut.save(unique_feed().0, completion);
        store.complete_deletion(Ok(()), 0);
        store.complete_insertion(Err(any_error()), 0);

        assert_eq!(*received.lock().unwrap(), vec![Err(any_error())]);
    }

    #[test]
    fn test_save_succeeds_on_successful_insertion() {
        let (sut, store) = make_sut();
        let (received, completion) = capture::<SaveResult>();

        sut.save(unique_feed().0, completion);
        store.complete_deletion(Ok(()), 0);
        store.complete_insertion(Ok(()), 0);

        assert_eq!(*received.lock().unwrap(), vec![Ok(())]);
    }

    #[test]
    fn test_save_does_not_deliver_deletion_error_after_loader_dropped() {
        let (sut, store) = make_sut();
        let (received, completion) = capture::<SaveResult>();

        sut.save(unique_feed().0, completion);
        drop(sut);
        store.complete_deletion(Err(any_error()), 0);

        assert!(received.lock().unwrap().is_empty());
    }

    #[test]
    fn test_save_does_not_deliver_insertion_error_after_loader_dropped() {
        let (sut, store) = make_sut();
        let (received, completion) = capture::<SaveResult>();

        sut.save(unique_feed().0, completion);
        store.complete_deletion(Ok(()), 0);
        drop(sut);
        store.complete_insertion(Err(any_error()), 0);

        assert!(received.lock().unwrap().is_empty());
    }

    // ========================================================================
    // load
    // ========================================================================

    #[test]
    fn test_load_requests_cache_retrieval() {
        let (sut, store) = make_sut();

        sut.load(|_| {});

        assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
    }

    #[test]
    fn test_load_fails_on_retrieval_error() {
        let (sut, store) = make_sut();
        let (received, completion) = capture::<LoadResult>();

        sut.load(completion);
        store.complete_retrieval(RetrievalOutcome::Failure(any_error()), 0);

        assert_eq!(*received.lock().unwrap(), vec![Err(any_error())]);
    }

    #[test]
    fn test_load_delivers_no_items_on_empty_cache() {
        let (sut, store) = make_sut();
        let (received, completion) = capture::<LoadResult>();

        sut.load(completion);
        store.complete_retrieval(RetrievalOutcome::Empty, 0);

        assert_eq!(*received.lock().unwrap(), vec![Ok(Vec::new())]);
    }

    #[test]
    fn test_load_delivers_cached_items_on_non_expired_cache() {
        let (models, local) = unique_feed();
        let now = fixed_now();
        let saved_at = now - max_age() + SignedDuration::from_secs(1);
        let (sut, store) = make_sut_at(now);
        let (received, completion) = capture::<LoadResult>();

        sut.load(completion);
        store.complete_retrieval(found(local, saved_at), 0);

        assert_eq!(*received.lock().unwrap(), vec![Ok(models)]);
    }

    #[test]
    fn test_load_delivers_no_items_on_cache_expiration() {
        let (_, local) = unique_feed();
        let now = fixed_now();
        let (sut, store) = make_sut_at(now);
        let (received, completion) = capture::<LoadResult>();

        sut.load(completion);
        store.complete_retrieval(found(local, now - max_age()), 0);

        assert_eq!(*received.lock().unwrap(), vec![Ok(Vec::new())]);
    }

    #[test]
    fn test_load_delivers_no_items_on_expired_cache() {
        let (_, local) = unique_feed();
        let now = fixed_now();
        let (sut, store) = make_sut_at(now);
        let (received, completion) = capture::<LoadResult>();

        sut.load(completion);
        store.complete_retrieval(found(local, now - max_age() - SignedDuration::from_secs(1)), 0);

        assert_eq!(*received.lock().unwrap(), vec![Ok(Vec::new())]);
    }

    #[test]
    fn test_load_has_no_side_effects_on_retrieval_error() {
        let (sut, store) = make_sut();

        sut.load(|_| {});
        store.complete_retrieval(RetrievalOutcome::Failure(any_error()), 0);

        assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
    }

    #[test]
    fn test_load_has_no_side_effects_on_expired_cache() {
        let (_, local) = unique_feed();
        let now = fixed_now();
        let (sut, store) = make_sut_at(now);

        sut.load(|_| {});
        store.complete_retrieval(found(local, now - max_age()), 0);

        assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
    }

    #[test]
    fn test_load_does_not_deliver_result_after_loader_dropped() {
        let (sut, store) = make_sut();
        let (received, completion) = capture::<LoadResult>();

        sut.load(completion);
        drop(sut);
        store.complete_retrieval(RetrievalOutcome::Empty, 0);

        assert!(received.lock().unwrap().is_empty());
    }

    #[test]
    fn test_load_then_validate_across_max_age_boundary() {
        let (models, local) = unique_feed();
        let saved_at = fixed_now();

        let (sut, store) = make_sut_at(saved_at + SignedDuration::from_hours(6 * 24));
        let (received, completion) = capture::<LoadResult>();
        sut.load(completion);
        store.complete_retrieval(found(local.clone(), saved_at), 0);
        assert_eq!(*received.lock().unwrap(), vec![Ok(models)]);

        let (sut, store) = make_sut_at(saved_at + max_age());
        let (received, completion) = capture::<LoadResult>();
        sut.load(completion);
        store.complete_retrieval(found(local.clone(), saved_at), 0);
        assert_eq!(*received.lock().unwrap(), vec![Ok(Vec::new())]);

        sut.validate_cache();
        store.complete_retrieval(found(local, saved_at), 1);
        assert_eq!(
            store.received_messages(),
            vec![
                ReceivedMessage::Retrieve,
                ReceivedMessage::Retrieve,
                ReceivedMessage::DeleteCachedFeed,
            ]
        );
    }

    // ========================================================================
    // validate_cache
    // ========================================================================

    #[test]
    fn test_validate_deletes_cache_on_retrieval_error() {
        let (sut, store) = make_sut();

        sut.validate_cache();
        store.complete_retrieval(RetrievalOutcome::Failure(any_error()), 0);

        assert_eq!(
            store.received_messages(),
            vec![ReceivedMessage::Retrieve, ReceivedMessage::DeleteCachedFeed]
        );
    }

    #[test]
    fn test_validate_does_not_delete_empty_cache() {
        let (sut, store) = make_sut();

        sut.validate_cache();
        store.complete_retrieval(RetrievalOutcome::Empty, 0);

        assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
    }

    #[test]
    fn test_validate_does_not_delete_non_expired_cache() {
        let (_, local) = unique_feed();
        let now = fixed_now();
        let (sut, store) = make_sut_at(now);

        sut.validate_cache();
        store.complete_retrieval(found(local, now - max_age() + SignedDuration::from_secs(1)), 0);

        assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
    }

    #[test]
    fn test_validate_deletes_cache_on_expiration() {
        let (_, local) = unique_feed();
        let now = fixed_now();
        let (sut, store) = make_sut_at(now);

        sut.validate_cache();
        store.complete_retrieval(found(local, now - max_age()), 0);

        assert_eq!(
            store.received_messages(),
            vec![ReceivedMessage::Retrieve, ReceivedMessage::DeleteCachedFeed]
        );
    }

    #[test]
    fn test_validate_deletes_expired_cache() {
        let (_, local) = unique_feed();
        let now = fixed_now();
        let (sut, store) = make_sut_at(now);

        sut.validate_cache();
        store.complete_retrieval(found(local, now - max_age() - SignedDuration::from_secs(1)), 0);

        assert_eq!(
            store.received_messages(),
            vec![ReceivedMessage::Retrieve, ReceivedMessage::DeleteCachedFeed]
        );
    }

    #[test]
    fn test_validate_does_not_delete_invalid_cache_after_loader_dropped() {
        let (sut, store) = make_sut();

        sut.validate_cache();
        drop(sut);
        store.complete_retrieval(RetrievalOutcome::Failure(any_error()), 0);

        assert_eq!(store.received_messages(), vec![ReceivedMessage::Retrieve]);
    }

    #[test]
    fn test_validate_reports_verdict_after_deletion_completes() {
        let (sut, store) = make_sut();
        let (received, completion) = capture::<CacheValidation>();

        sut.validate_cache_then(completion);
        store.complete_retrieval(RetrievalOutcome::Failure(any_error()), 0);
        assert!(received.lock().unwrap().is_empty());

        store.complete_deletion(Err(any_error()), 0);
        assert_eq!(*received.lock().unwrap(), vec![CacheValidation::Corrupted]);
    }

    #[test]
    fn test_validate_reports_kept_cache_immediately() {
        let (_, local) = unique_feed();
        let (sut, store) = make_sut();
        let (received, completion) = capture::<CacheValidation>();

        sut.validate_cache_then(completion);
        store.complete_retrieval(found(local, fixed_now()), 0);

        assert_eq!(*received.lock().unwrap(), vec![CacheValidation::Valid]);
    }
}
