//! Database schema definitions and creation
//!
//! This module defines the SQLite schema for the pending-reference source
//! table, the image catalog, and per-run metadata, and provides functions
//! to create and configure the database.

use crate::error::DbResult;
use rusqlite::Connection;

/// Current schema version for migrations
pub const SCHEMA_VERSION: u32 = 1;

/// SQL to create the pending references source table
const CREATE_PENDING_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS pending_references (
    id INTEGER PRIMARY KEY,
    unique_reference TEXT NOT NULL,
    sequence_number TEXT NOT NULL,
    color_code TEXT NOT NULL,
    base_reference TEXT NOT NULL
)
"#;

/// SQL to create the image catalog table
///
/// Rows are insert-only from this system's point of view. The primary key
/// backs up the exclusion query: a conflicting insert fails its whole chunk
/// instead of silently duplicating a reference.
const CREATE_CATALOG_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS image_catalog (
    unique_reference TEXT PRIMARY KEY,
    path TEXT NOT NULL
)
"#;

/// SQL to create the run metadata table
const CREATE_RUN_INFO_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS run_info (
    key TEXT PRIMARY KEY,
    value TEXT
)
"#;

/// SQL to create indexes for the pending-reference anti-join
const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_pending_reference ON pending_references(unique_reference)",
];

/// SQLite pragmas applied on open
const WRITE_PRAGMAS: &str = r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
PRAGMA temp_store = MEMORY;
"#;

/// Create and configure the database
pub fn create_database(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(WRITE_PRAGMAS)?;

    conn.execute(CREATE_PENDING_TABLE, [])?;
    conn.execute(CREATE_CATALOG_TABLE, [])?;
    conn.execute(CREATE_RUN_INFO_TABLE, [])?;

    for sql in CREATE_INDEXES {
        conn.execute(sql, [])?;
    }

    Ok(())
}

/// Store run metadata
pub fn set_run_info(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO run_info (key, value) VALUES (?1, ?2)",
        [key, value],
    )?;
    Ok(())
}

/// Get run metadata
pub fn get_run_info(conn: &Connection, key: &str) -> DbResult<Option<String>> {
    let result = conn.query_row("SELECT value FROM run_info WHERE key = ?1", [key], |row| {
        row.get(0)
    });

    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Metadata keys used by the reconciler
pub mod keys {
    /// Timestamp when the run started (ISO 8601)
    pub const START_TIME: &str = "start_time";

    /// Timestamp when the run completed (ISO 8601)
    pub const END_TIME: &str = "end_time";

    /// Total duration in seconds
    pub const DURATION_SECS: &str = "duration_secs";

    /// Number of worker threads used
    pub const WORKER_COUNT: &str = "worker_count";

    /// Batch size used for catalog inserts
    pub const BATCH_SIZE: &str = "batch_size";

    /// References with a matching image found
    pub const FOUND: &str = "found";

    /// References with no matching image
    pub const NOT_FOUND: &str = "not_found";

    /// References whose resolution failed with an error
    pub const ERRORS: &str = "errors";

    /// Catalog rows inserted
    pub const INSERTED: &str = "inserted";

    /// Schema version
    pub const SCHEMA_VERSION: &str = "schema_version";

    /// Reconciler version
    pub const RECONCILER_VERSION: &str = "reconciler_version";

    /// Run status: "running", "completed", "failed"
    pub const STATUS: &str = "status";
}
