//! Run coordinator - orchestrates one reconciliation pass
//!
//! The coordinator is responsible for:
//! - Opening the database connection (and releasing it on every exit path)
//! - Fetching pending references
//! - Dispatching items across the worker pool
//! - Accumulating found matches and flushing them in batches
//! - Final statistics and run metadata
//!
//! The connection is owned here and never crosses a thread boundary;
//! workers report back over a channel and the coordinator alone performs
//! flushes and counter updates.

use crate::config::ReconcileConfig;
use crate::db::{self, keys, schema};
use crate::error::Result;
use crate::reconcile::dispatch::Dispatch;
use crate::resolver::{ImageResolver, VariantStrategy};
use crate::types::{ItemResult, Resolution};
use chrono::Utc;
use rusqlite::Connection;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Result of a completed reconciliation run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Pending references fetched
    pub pending: usize,

    /// Items with a matching image
    pub found: u64,

    /// Items with no matching image (includes failed items)
    pub not_found: u64,

    /// Items whose resolution failed with an error
    pub errors: u64,

    /// Catalog rows inserted
    pub inserted: u64,

    /// Catalog rows lost to rolled-back chunks
    pub insert_failed: u64,

    /// Batch flushes performed
    pub flushes: u64,

    /// Time taken for the run
    pub duration: Duration,

    /// Whether the run completed (vs degraded out on connection failure)
    pub completed: bool,
}

/// Coordinates one full reconciliation pass
pub struct Reconciler {
    /// Configuration (tunables already clamped)
    config: ReconcileConfig,
}

impl Reconciler {
    /// Create a new reconciler
    pub fn new(config: ReconcileConfig) -> Self {
        Self { config }
    }

    /// Run one reconciliation pass to completion
    ///
    /// A connection failure is a degraded no-op: logged, `completed = false`,
    /// still `Ok`. A query failure propagates as `Err` after a best-effort
    /// status update. The connection is released on every exit path.
    pub fn run(&self) -> Result<RunReport> {
        let started = Instant::now();

        info!(
            db = %self.config.db_path.display(),
            root = %self.config.image_root.display(),
            workers = self.config.worker_count,
            batch_size = self.config.batch_size,
            "Starting reconciliation run"
        );

        let conn = match Connection::open(&self.config.db_path) {
            Ok(conn) => conn,
            Err(e) => {
                error!(
                    path = %self.config.db_path.display(),
                    error = %e,
                    "Could not open database, skipping run"
                );
                return Ok(RunReport {
                    duration: started.elapsed(),
                    ..RunReport::default()
                });
            }
        };

        let result = self.run_with_connection(&conn, started);

        if result.is_err() {
            let _ = schema::set_run_info(&conn, keys::STATUS, "failed");
        }

        // Connection drops here on every path, success or error
        result
    }

    fn run_with_connection(&self, conn: &Connection, started: Instant) -> Result<RunReport> {
        db::create_database(conn)?;
        self.record_run_start(conn)?;

        let items = db::fetch_pending(conn)?;

        let mut report = RunReport {
            pending: items.len(),
            ..RunReport::default()
        };

        if items.is_empty() {
            info!("No pending references to process");
            report.completed = true;
            report.duration = started.elapsed();
            self.record_run_end(conn, &report)?;
            return Ok(report);
        }

        let strategy = Arc::new(VariantStrategy::new(ImageResolver::new(
            self.config.image_root.clone(),
        )));
        let dispatch = Dispatch::start(items, strategy, self.config.worker_count)?;

        let mut batch: Vec<(String, String)> = Vec::with_capacity(self.config.batch_size);

        for ItemResult { item, resolution } in dispatch.results().iter() {
            match resolution {
                Resolution::Found(path) => {
                    report.found += 1;
                    batch.push((item.unique_reference, path.display().to_string()));

                    if batch.len() >= self.config.batch_size {
                        let (ok, failed) = db::flush_batch(conn, &mut batch);
                        report.inserted += ok as u64;
                        report.insert_failed += failed as u64;
                        report.flushes += 1;

                        info!(
                            processed = report.found + report.not_found,
                            pending = report.pending,
                            "Progress"
                        );
                    }
                }
                Resolution::NotFound => {
                    report.not_found += 1;
                }
                Resolution::Failed(reason) => {
                    warn!(
                        reference = %item.unique_reference,
                        reason = %reason,
                        "Item resolution failed, counting as not found"
                    );
                    report.errors += 1;
                    report.not_found += 1;
                }
            }
        }

        if let Err(e) = dispatch.join() {
            warn!(error = %e, "Worker failed to join cleanly");
        }

        // Drain whatever is left after the last threshold flush
        if !batch.is_empty() {
            let (ok, failed) = db::flush_batch(conn, &mut batch);
            report.inserted += ok as u64;
            report.insert_failed += failed as u64;
            report.flushes += 1;
        }

        report.duration = started.elapsed();
        report.completed = true;

        info!(
            found = report.found,
            not_found = report.not_found,
            errors = report.errors,
            inserted = report.inserted,
            duration_secs = report.duration.as_secs(),
            "Reconciliation completed"
        );

        self.record_run_end(conn, &report)?;
        Ok(report)
    }

    /// Record run metadata at start
    fn record_run_start(&self, conn: &Connection) -> Result<()> {
        schema::set_run_info(conn, keys::START_TIME, &Utc::now().to_rfc3339())?;
        schema::set_run_info(conn, keys::STATUS, "running")?;
        schema::set_run_info(conn, keys::WORKER_COUNT, &self.config.worker_count.to_string())?;
        schema::set_run_info(conn, keys::BATCH_SIZE, &self.config.batch_size.to_string())?;
        schema::set_run_info(conn, keys::SCHEMA_VERSION, &schema::SCHEMA_VERSION.to_string())?;
        schema::set_run_info(conn, keys::RECONCILER_VERSION, env!("CARGO_PKG_VERSION"))?;
        Ok(())
    }

    /// Record run metadata and counters at the end
    fn record_run_end(&self, conn: &Connection, report: &RunReport) -> Result<()> {
        schema::set_run_info(conn, keys::END_TIME, &Utc::now().to_rfc3339())?;
        schema::set_run_info(
            conn,
            keys::DURATION_SECS,
            &report.duration.as_secs().to_string(),
        )?;
        schema::set_run_info(conn, keys::FOUND, &report.found.to_string())?;
        schema::set_run_info(conn, keys::NOT_FOUND, &report.not_found.to_string())?;
        schema::set_run_info(conn, keys::ERRORS, &report.errors.to_string())?;
        schema::set_run_info(conn, keys::INSERTED, &report.inserted.to_string())?;
        schema::set_run_info(conn, keys::STATUS, "completed")?;
        Ok(())
    }
}
