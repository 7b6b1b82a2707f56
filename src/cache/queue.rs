//! Serial execution context for store backends.
//!
//! Each queue owns one worker thread. Jobs run one at a time, in the order
//! they were dispatched, so side effects on a store never interleave.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::thread;

use tokio::sync::mpsc;

use crate::cache::StoreError;

type Job = Box<dyn FnOnce() + Send + 'static>;

pub(crate) struct SerialQueue {
    label: String,
    sender: mpsc::UnboundedSender<Job>,
}

impl SerialQueue {
    /// Spawn the worker thread backing a new queue.
    pub(crate) fn new(label: impl Into<String>) -> Result<Self, StoreError> {
        let label = label.into();
        let (sender, mut receiver) = mpsc::unbounded_channel::<Job>();

        let worker_label = label.clone();
        thread::Builder::new()
            .name(label.clone())
            .spawn(move || {
                while let Some(job) = receiver.blocking_recv() {
                    if catch_unwind(AssertUnwindSafe(job)).is_err() {
                        tracing::error!(queue = %worker_label, "Store job panicked");
                    }
                }
                tracing::trace!(queue = %worker_label, "Store queue drained");
            })
            .map_err(|e| StoreError::io("spawn store queue", e))?;

        Ok(Self { label, sender })
    }

    /// Enqueue `job` behind everything already dispatched.
    pub(crate) fn dispatch(&self, job: impl FnOnce() + Send + 'static) {
        if let Err(mpsc::error::SendError(job)) = self.sender.send(Box::new(job)) {
            // Worker is gone; run inline so the job's completion still fires.
            tracing::warn!(queue = %self.label, "Store queue unavailable, running job inline");
            job();
        }
    }
}
