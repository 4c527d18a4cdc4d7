//! Core value types for the reconciliation run
//!
//! Rows coming off the database are mapped into [`WorkItem`] at the work
//! source boundary so the rest of the pipeline never touches raw row tuples.

use std::path::PathBuf;

/// One pending reference needing an image match
///
/// Created once at fetch time and consumed exactly once by the resolution
/// stage. All fields are the string form of the source columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Primary business key identifying the product variant
    pub unique_reference: String,

    /// Sequence number within the base reference
    pub sequence_number: String,

    /// Color code of the variant
    pub color_code: String,

    /// Base reference shared across variants
    pub base_reference: String,
}

/// Outcome of resolving one work item against the filesystem
///
/// `Failed` is distinct from `NotFound` so that resolution errors show up in
/// the run report rather than only in logs. The coordinator counts a failed
/// item as not-found for the headline counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// An image file existed for one of the candidate names
    Found(PathBuf),

    /// All candidate names were tried and none matched
    NotFound,

    /// Resolution aborted with an error (e.g. image root unreadable)
    Failed(String),
}

impl Resolution {
    /// Returns true if an image was found
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

/// A (work item, outcome) pair produced by a worker
///
/// Results arrive at the coordinator in completion order, not submission
/// order; downstream aggregation is commutative so this is safe.
#[derive(Debug, Clone)]
pub struct ItemResult {
    /// The item that was resolved
    pub item: WorkItem,

    /// What the resolution stage concluded
    pub resolution: Resolution,
}
