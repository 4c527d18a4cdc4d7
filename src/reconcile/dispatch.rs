//! Parallel dispatcher: fixed worker pool over a fetched batch of items
//!
//! The work set is known up front (one fetch per run), so the work channel
//! is sized to hold every item and seeded before the workers start. Channel
//! disconnection is the termination signal: workers exit when the work
//! queue drains, and the results iterator ends when the last worker drops
//! its sender. No polling, no timeouts, no orphaned work after `join`.

use crate::error::WorkerError;
use crate::reconcile::worker::Worker;
use crate::resolver::VariantStrategy;
use crate::types::{ItemResult, WorkItem};
use crossbeam_channel::{bounded, Receiver};
use std::sync::Arc;
use tracing::debug;

/// A running worker pool and the receiving end of its results
pub struct Dispatch {
    /// Worker threads
    workers: Vec<Worker>,

    /// Results arrive here in completion order
    results: Receiver<ItemResult>,
}

impl Dispatch {
    /// Seed the work queue with every item and spawn `worker_count` workers
    ///
    /// Exactly one [`ItemResult`] is produced per input item, in completion
    /// order. Iterate [`results`](Self::results) until it disconnects, then
    /// call [`join`](Self::join).
    pub fn start(
        items: Vec<WorkItem>,
        strategy: Arc<VariantStrategy>,
        worker_count: usize,
    ) -> Result<Self, WorkerError> {
        let capacity = items.len().max(1);
        let (work_tx, work_rx) = bounded::<WorkItem>(capacity);
        let (result_tx, result_rx) = bounded::<ItemResult>(capacity);

        // The channel holds the whole batch, so these sends never block
        for item in items {
            work_tx
                .send(item)
                .map_err(|_| WorkerError::QueueSendFailed)?;
        }
        drop(work_tx);

        let mut workers = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            workers.push(Worker::spawn(
                id,
                Arc::clone(&strategy),
                work_rx.clone(),
                result_tx.clone(),
            )?);
        }

        // Drop the originals so disconnection propagates once the workers
        // finish
        drop(work_rx);
        drop(result_tx);

        debug!(workers = workers.len(), "Dispatch started");

        Ok(Self {
            workers,
            results: result_rx,
        })
    }

    /// Receiver yielding one result per submitted item, in completion order
    pub fn results(&self) -> &Receiver<ItemResult> {
        &self.results
    }

    /// Join every worker thread
    ///
    /// Guarantees no work outlives the dispatch. A panicked worker surfaces
    /// as [`WorkerError::Panicked`].
    pub fn join(self) -> Result<(), WorkerError> {
        for worker in self.workers {
            worker.join()?;
        }
        Ok(())
    }
}
