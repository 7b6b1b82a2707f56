//! Test double recording every message a `FeedStore` receives.

use std::sync::Mutex;

use jiff::Timestamp;

use crate::cache::{
    DeletionCompletion, FeedStore, InsertionCompletion, LocalFeedItem, RetrievalCompletion,
    RetrievalOutcome, StoreError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ReceivedMessage {
    DeleteCachedFeed,
    Insert(Vec<LocalFeedItem>, Timestamp),
    Retrieve,
}

#[derive(Default)]
struct SpyState {
    messages: Vec<ReceivedMessage>,
    deletions: Vec<Option<DeletionCompletion>>,
    insertions: Vec<Option<InsertionCompletion>>,
    retrievals: Vec<Option<RetrievalCompletion>>,
}

/// Captures completions so tests decide when and how each operation finishes.
#[derive(Default)]
pub(crate) struct FeedStoreSpy {
    state: Mutex<SpyState>,
}

impl FeedStoreSpy {
    pub(crate) fn received_messages(&self) -> Vec<ReceivedMessage> {
        self.state.lock().unwrap().messages.clone()
    }

    pub(crate) fn complete_deletion(&self, result: Result<(), StoreError>, at: usize) {
        let completion = self.state.lock().unwrap().deletions[at]
            .take()
            .expect("deletion already completed");
        completion(result);
    }

    pub(crate) fn complete_insertion(&self, result: Result<(), StoreError>, at: usize) {
        let completion = self.state.lock().unwrap().insertions[at]
            .take()
            .expect("insertion already completed");
        completion(result);
    }

    pub(crate) fn complete_retrieval(&self, outcome: RetrievalOutcome, at: usize) {
        let completion = self.state.lock().unwrap().retrievals[at]
            .take()
            .expect("retrieval already completed");
        completion(outcome);
    }
}

impl FeedStore for FeedStoreSpy {
    fn delete_cached_feed(&self, completion: DeletionCompletion) {
        let mut state = self.state.lock().unwrap();
        state.messages.push(ReceivedMessage::DeleteCachedFeed);
        state.deletions.push(Some(completion));
    }

    fn insert(&self, feed: Vec<LocalFeedItem>, timestamp: Timestamp, completion: InsertionCompletion) {
        let mut state = self.state.lock().unwrap();
        state.messages.push(ReceivedMessage::Insert(feed, timestamp));
        state.insertions.push(Some(completion));
    }

    fn retrieve(&self, completion: RetrievalCompletion) {
        let mut state = self.state.lock().unwrap();
        state.messages.push(ReceivedMessage::Retrieve);
        state.retrievals.push(Some(completion));
    }
}
