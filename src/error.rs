//! Error types for image-reconciler
//!
//! This module defines the error hierarchy covering:
//! - SQLite database errors
//! - Filesystem resolution errors
//! - Worker thread errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include context about what failed
//! - Preserve error chains for debugging

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the reconciler
#[derive(Error, Debug)]
pub enum ReconcilerError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Schema error
    #[error("Database schema error: {0}")]
    Schema(String),

    /// Transaction failed
    #[error("Transaction failed: {0}")]
    Transaction(String),
}

/// Filesystem resolution errors
///
/// Per-entry traversal errors (permission denied on a subdirectory, a file
/// vanishing mid-walk) are logged and skipped inside the resolver; only a
/// failure to walk the root itself surfaces as an error.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The image root could not be walked at all
    #[error("Failed to walk image root '{root}': {source}")]
    RootWalk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Worker thread errors
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked")]
    Panicked { id: usize },

    /// Worker initialization failed
    #[error("Failed to initialize worker {id}: {reason}")]
    InitFailed { id: usize, reason: String },

    /// Work queue send failed
    #[error("Failed to send work item: queue closed")]
    QueueSendFailed,

    /// Result channel closed before all results were collected
    #[error("Result channel closed unexpectedly")]
    ResultChannelClosed,
}

/// Result type alias for ReconcilerError
pub type Result<T> = std::result::Result<T, ReconcilerError>;

/// Result type alias for DbError
pub type DbResult<T> = std::result::Result<T, DbError>;

/// Result type alias for ResolveError
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
