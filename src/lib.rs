//! image-reconciler - Product reference to image file reconciliation
//!
//! Reconciles product reference records stored in SQLite with image files
//! present on a filesystem, recording the matched file path back into the
//! catalog table. For each pending reference, a small set of filename
//! variants is tried against a directory tree; found matches are persisted
//! in batched transactions.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      SQLite database                      │
//! │   pending_references ──(anti-join)──▶ work items          │
//! │   image_catalog      ◀──(batched tx)── found matches      │
//! └───────────────┬───────────────────────────▲───────────────┘
//!                 │                           │
//!                 ▼                           │
//! ┌───────────────────────────────────────────┴───────────────┐
//! │                       Coordinator                         │
//! │   - owns the connection and all counters                  │
//! │   - flushes found pairs at the batch threshold            │
//! └───────┬───────────────────────────────────▲───────────────┘
//!         │ WorkItem                          │ ItemResult
//!         ▼                                   │
//! ┌───────────────────────────────────────────┴───────────────┐
//! │                   Worker Threads (1..4)                   │
//! │   variant strategy ──▶ filename resolver ──▶ walkdir      │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Reconcile against the default tunables (500/batch, 4 workers)
//! image-reconciler catalog.db /home/u2
//!
//! # Inspect the results
//! sqlite3 catalog.db "SELECT unique_reference, path FROM image_catalog"
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod progress;
pub mod reconcile;
pub mod resolver;
pub mod types;

pub use config::{CliArgs, ReconcileConfig};
pub use error::{ReconcilerError, Result};
pub use reconcile::{Reconciler, RunReport};
pub use types::{ItemResult, Resolution, WorkItem};
