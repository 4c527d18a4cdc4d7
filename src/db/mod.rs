//! Database module: SQLite-backed work source and catalog writer
//!
//! The connection is owned by the coordinating thread for the whole run and
//! released unconditionally when the run ends; resolver workers never touch
//! it. Results flow to the coordinator over a channel, and the coordinator
//! alone performs batch flushes.

pub mod schema;
pub mod source;
pub mod writer;

pub use schema::{create_database, get_run_info, keys, set_run_info};
pub use source::fetch_pending;
pub use writer::flush_batch;
