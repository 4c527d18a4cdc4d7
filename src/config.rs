//! Configuration types for image-reconciler
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with tunable clamping
//!
//! The two tunables (batch size, worker count) are clamped into `[1, max]`
//! rather than rejected: an out-of-range value is logged and replaced so a
//! bad flag never prevents a run.

use clap::Parser;
use std::path::PathBuf;
use tracing::warn;

/// Default batch size for catalog inserts
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// Maximum batch size
pub const MAX_BATCH_SIZE: usize = 500;

/// Default number of resolver worker threads
pub const DEFAULT_WORKERS: usize = 4;

/// Maximum worker count (resolver walks are I/O bound; more workers just
/// thrash the filesystem)
pub const MAX_WORKERS: usize = 4;

/// Reconcile pending product references with image files on disk
#[derive(Parser, Debug, Clone)]
#[command(
    name = "image-reconciler",
    version,
    about = "Reconciles pending product references with image files on disk",
    long_about = "Fetches references not yet present in the image catalog, searches a \
                  directory tree for a matching image file per reference using a fixed \
                  set of filename variants, and records found paths back into the \
                  catalog in batched transactions.",
    after_help = "EXAMPLES:\n    \
        image-reconciler catalog.db /home/u2\n    \
        image-reconciler catalog.db /srv/images -w 2 -b 100\n    \
        image-reconciler catalog.db /srv/images -v"
)]
pub struct CliArgs {
    /// SQLite database holding the pending references and the catalog
    #[arg(value_name = "DATABASE")]
    pub database: PathBuf,

    /// Root directory to search for image files
    #[arg(value_name = "IMAGE_ROOT")]
    pub image_root: PathBuf,

    /// Catalog insert batch size (clamped to [1, 500])
    #[arg(short = 'b', long, default_value = "500", value_name = "NUM", allow_negative_numbers = true)]
    pub batch_size: i64,

    /// Number of resolver worker threads (clamped to [1, 4])
    #[arg(short = 'w', long, default_value = "4", value_name = "NUM", allow_negative_numbers = true)]
    pub workers: i64,

    /// Quiet mode - suppress the header and summary output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose output (per-item resolution logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    /// SQLite database path
    pub db_path: PathBuf,

    /// Image search root
    pub image_root: PathBuf,

    /// Catalog insert batch size
    pub batch_size: usize,

    /// Number of worker threads
    pub worker_count: usize,

    /// Show header and summary
    pub show_summary: bool,

    /// Verbose logging
    pub verbose: bool,
}

impl ReconcileConfig {
    /// Create configuration from CLI arguments, clamping the tunables
    pub fn from_args(args: CliArgs) -> Self {
        let batch_size = clamp_tunable("batch_size", args.batch_size, DEFAULT_BATCH_SIZE, MAX_BATCH_SIZE);
        let worker_count = clamp_tunable("workers", args.workers, DEFAULT_WORKERS, MAX_WORKERS);

        Self {
            db_path: args.database,
            image_root: args.image_root,
            batch_size,
            worker_count,
            show_summary: !args.quiet,
            verbose: args.verbose,
        }
    }
}

/// Clamp a tunable into `[1, max]`, substituting the default for
/// non-positive values
fn clamp_tunable(name: &str, value: i64, default: usize, max: usize) -> usize {
    if value < 1 {
        warn!(tunable = name, value, default, "Invalid tunable, using default");
        return default;
    }
    let value = value as usize;
    if value > max {
        warn!(tunable = name, value, max, "Tunable too large, clamping");
        return max;
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(batch_size: i64, workers: i64) -> CliArgs {
        CliArgs {
            database: PathBuf::from("test.db"),
            image_root: PathBuf::from("/images"),
            batch_size,
            workers,
            quiet: false,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_tunables_pass_through() {
        let config = ReconcileConfig::from_args(args_with(100, 2));
        assert_eq!(config.batch_size, 100);
        assert_eq!(config.worker_count, 2);
    }

    #[test]
    fn test_zero_batch_size_replaced_by_default() {
        let config = ReconcileConfig::from_args(args_with(0, 4));
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_negative_worker_count_replaced_by_default() {
        let config = ReconcileConfig::from_args(args_with(500, -1));
        assert_eq!(config.worker_count, DEFAULT_WORKERS);
    }

    #[test]
    fn test_oversized_tunables_clamped_to_max() {
        let config = ReconcileConfig::from_args(args_with(10_000, 64));
        assert_eq!(config.batch_size, MAX_BATCH_SIZE);
        assert_eq!(config.worker_count, MAX_WORKERS);
    }
}
