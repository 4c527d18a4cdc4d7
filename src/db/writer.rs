//! Batched catalog writer
//!
//! Writes found (reference, path) pairs to the catalog in fixed-size chunks,
//! one transaction per chunk. A chunk either commits whole or rolls back
//! whole; there is no per-row retry.
//!
//! The writer runs on the coordinating thread: the SQLite connection is not
//! shared with the resolver workers, which only ever touch the filesystem.

use crate::error::DbResult;
use rusqlite::{params, Connection};
use tracing::{error, info};

/// Flush a batch of (unique_reference, path) pairs into the catalog
///
/// Drains `batch` regardless of outcome. Returns `(inserted, failed)`:
/// `(n, 0)` when the whole chunk committed, `(0, n)` when any insert failed
/// and the chunk was rolled back. A failed chunk is logged, never retried.
pub fn flush_batch(conn: &Connection, batch: &mut Vec<(String, String)>) -> (usize, usize) {
    if batch.is_empty() {
        return (0, 0);
    }

    let pairs: Vec<(String, String)> = batch.drain(..).collect();
    let count = pairs.len();

    match insert_chunk(conn, &pairs) {
        Ok(()) => {
            info!(inserted = count, "Catalog batch committed");
            (count, 0)
        }
        Err(e) => {
            error!(failed = count, error = %e, "Catalog batch failed, rolled back");
            (0, count)
        }
    }
}

/// Insert all pairs in one transaction
fn insert_chunk(conn: &Connection, pairs: &[(String, String)]) -> DbResult<()> {
    // Transaction rolls back on drop if not committed
    let tx = conn.unchecked_transaction()?;

    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO image_catalog (unique_reference, path) VALUES (?1, ?2)",
        )?;

        for (reference, path) in pairs {
            stmt.execute(params![reference, path])?;
        }
    }

    tx.commit()?;
    Ok(())
}
