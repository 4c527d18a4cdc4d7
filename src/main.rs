//! image-reconciler - CLI entry point

use anyhow::{Context, Result};
use clap::Parser;
use image_reconciler::config::{CliArgs, ReconcileConfig};
use image_reconciler::progress::{print_header, print_summary};
use image_reconciler::reconcile::Reconciler;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();

    setup_logging(args.verbose)?;

    // Tunables are clamped, never rejected
    let config = ReconcileConfig::from_args(args);

    if config.show_summary {
        print_header(
            &config.db_path.display().to_string(),
            &config.image_root.display().to_string(),
            config.worker_count,
            config.batch_size,
        );
    }

    let report = Reconciler::new(config.clone())
        .run()
        .context("Reconciliation run failed")?;

    if config.show_summary {
        print_summary(&report);
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("image_reconciler=debug,warn")
    } else {
        EnvFilter::new("image_reconciler=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}
