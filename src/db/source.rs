//! Work source: pending-reference query
//!
//! Selects every distinct reference not yet present in the image catalog and
//! maps the rows into typed [`WorkItem`]s at this boundary, so the rest of
//! the pipeline never handles raw row tuples.

use crate::error::DbResult;
use crate::types::WorkItem;
use rusqlite::Connection;
use tracing::info;

/// Anti-join selecting references that still need an image
const PENDING_QUERY: &str = r#"
SELECT DISTINCT unique_reference, sequence_number, color_code, base_reference
FROM pending_references
WHERE unique_reference NOT IN (
    SELECT unique_reference FROM image_catalog
)
"#;

/// Fetch all pending work items
///
/// An empty result is the normal terminal state when everything is already
/// cataloged, not an error.
pub fn fetch_pending(conn: &Connection) -> DbResult<Vec<WorkItem>> {
    let mut stmt = conn.prepare(PENDING_QUERY)?;

    let items = stmt
        .query_map([], |row| {
            Ok(WorkItem {
                unique_reference: row.get(0)?,
                sequence_number: row.get(1)?,
                color_code: row.get(2)?,
                base_reference: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    info!(pending = items.len(), "Fetched pending references");
    Ok(items)
}
