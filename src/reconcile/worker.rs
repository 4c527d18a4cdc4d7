//! Worker thread logic for parallel image resolution
//!
//! Each worker pulls one work item at a time from the shared queue, runs the
//! variant strategy against the filesystem (blocking I/O), and sends exactly
//! one result back to the coordinator. Resolution errors are downgraded to a
//! `Failed` outcome here so one bad item never takes down a sibling or the
//! pool.

use crate::error::WorkerError;
use crate::resolver::VariantStrategy;
use crate::types::{ItemResult, Resolution, WorkItem};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// A worker thread that resolves work items
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    /// Spawn a new worker thread
    pub fn spawn(
        id: usize,
        strategy: Arc<VariantStrategy>,
        work_rx: Receiver<WorkItem>,
        result_tx: Sender<ItemResult>,
    ) -> Result<Self, WorkerError> {
        let handle = thread::Builder::new()
            .name(format!("resolver-{}", id))
            .spawn(move || worker_loop(id, strategy, work_rx, result_tx))
            .map_err(|e| WorkerError::InitFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Wait for the worker to finish
    pub fn join(mut self) -> Result<(), WorkerError> {
        if let Some(handle) = self.handle.take() {
            handle
                .join()
                .map_err(|_| WorkerError::Panicked { id: self.id })?;
        }
        Ok(())
    }
}

/// Main worker loop: runs until the work queue disconnects
fn worker_loop(
    id: usize,
    strategy: Arc<VariantStrategy>,
    work_rx: Receiver<WorkItem>,
    result_tx: Sender<ItemResult>,
) {
    debug!(worker = id, "Worker starting");

    let mut resolved = 0u64;

    while let Ok(item) = work_rx.recv() {
        let resolution = match strategy.find_image(&item) {
            Ok(Some(path)) => {
                debug!(
                    worker = id,
                    reference = %item.unique_reference,
                    path = %path.display(),
                    "Image found"
                );
                Resolution::Found(path)
            }
            Ok(None) => {
                debug!(worker = id, reference = %item.unique_reference, "No image found");
                Resolution::NotFound
            }
            Err(e) => {
                warn!(
                    worker = id,
                    reference = %item.unique_reference,
                    error = %e,
                    "Resolution failed"
                );
                Resolution::Failed(e.to_string())
            }
        };

        resolved += 1;

        // Coordinator gone - nothing left to do
        if result_tx.send(ItemResult { item, resolution }).is_err() {
            break;
        }
    }

    debug!(worker = id, resolved, "Worker shutting down");
}
