//! Console output for the start and end of a run
//!
//! Structured diagnostics go through tracing; this is the human-facing
//! banner and summary block.

use crate::reconcile::RunReport;
use console::style;

/// Print a header at the start of the run
pub fn print_header(db_path: &str, image_root: &str, workers: usize, batch_size: usize) {
    println!();
    println!(
        "{} {}",
        style("image-reconciler").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Database:").bold(), db_path);
    println!("  {} {}", style("Image root:").bold(), image_root);
    println!("  {} {}", style("Workers:").bold(), workers);
    println!("  {} {}", style("Batch size:").bold(), batch_size);
    println!();
}

/// Print a summary of the run results
pub fn print_summary(report: &RunReport) {
    println!();
    if report.completed {
        println!("{}", style("Reconciliation Complete").green().bold());
    } else {
        println!("{}", style("Reconciliation Skipped").yellow().bold());
    }
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Pending:").bold(), report.pending);
    println!("  {} {}", style("Found:").bold(), report.found);
    println!("  {} {}", style("Not found:").bold(), report.not_found);
    println!("  {} {}", style("Inserted:").bold(), report.inserted);
    if report.insert_failed > 0 {
        println!(
            "  {} {}",
            style("Insert failed:").yellow().bold(),
            report.insert_failed
        );
    }
    if report.errors > 0 {
        println!("  {} {}", style("Errors:").yellow().bold(), report.errors);
    }
    println!(
        "  {} {:.1}s",
        style("Duration:").bold(),
        report.duration.as_secs_f64()
    );
    println!();
}
