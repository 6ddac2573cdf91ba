//! Move command implementation.
//!
//! Loads configuration, runs the move pipeline over a source directory
//! and prints a summary of what happened to each file.

use crate::core::pipeline::{FileOutcome, MovePipeline, RunSummary};
use crate::models::config;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Move and rename the episodes found below `source`.
pub async fn move_files(source: &Path, config_path: Option<&Path>, hash: Option<&str>) -> Result<()> {
    let config = config::load_config(config_path)?;
    if let Some(ref used) = config.source {
        tracing::info!("Using config file: {}", used.display());
    }
    for key in ["plex.tvpath", "plex.errorpath"] {
        match config.lookup(key) {
            Some(value) => tracing::debug!("{} = {}", key, value),
            None => tracing::warn!("{} is not set", key),
        }
    }

    let pipeline = MovePipeline::new(config, hash.map(str::to_string));
    let summary = pipeline.run(source).await?;

    print_summary(&summary);
    Ok(())
}

/// Print the run summary.
fn print_summary(summary: &RunSummary) {
    println!();
    println!("{}", "[Move Summary]".bold().green());
    println!("  {} {}", "Files found:".bold(), summary.found());
    println!("  {} {}", "Moved:".bold(), summary.relocated());
    println!("  {} {}", "Unrecognised:".bold(), summary.quarantined());
    if summary.skipped() > 0 {
        println!("  {} {}", "Left in place:".bold(), summary.skipped());
    }
    if summary.failed() > 0 {
        println!("  {} {}", "Failed:".bold().red(), summary.failed());
    }

    for outcome in &summary.outcomes {
        match outcome {
            FileOutcome::Relocated { from, to } => {
                println!("  {} {} -> {}", "[OK]".green(), from.display(), to.display());
            }
            FileOutcome::Quarantined { from, to, replaced } => {
                let note = if *replaced { " (overwritten)" } else { "" };
                println!(
                    "  {} {} -> {}{}",
                    "[??]".yellow(),
                    from.display(),
                    to.display(),
                    note
                );
            }
            FileOutcome::FailedCopy { from, error } => {
                println!("  {} {}: {}", "[FAIL]".red(), from.display(), error);
            }
            FileOutcome::Skipped { from } => {
                println!("  {} {}", "[SKIP]".yellow(), from.display());
            }
        }
    }
}
