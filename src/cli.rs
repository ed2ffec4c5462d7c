//! Command-line interface.
//!
//! Defines the argument surface and the orchestration that wires
//! configuration loading, the transfer engine, console reporting, and
//! optional log persistence together. Undo mode is dispatched here too and
//! bypasses source/destination validation entirely.

use crate::config;
use crate::organizer::{OrganizeOptions, Organizer, RunReport};
use crate::output::OutputFormatter;
use crate::undo::UndoManager;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

/// Organize files into category subdirectories by extension.
#[derive(Parser, Debug)]
#[command(
    name = "declutter",
    version,
    about = "Organize files into category subdirectories by extension",
    after_help = "Examples:\n  \
        declutter /path/to/messy/folder --dest /path/to/organized\n  \
        declutter ~/Downloads --dry-run --recursive\n  \
        declutter ~/Documents --pattern '\\.pdf$' --copy --save-log operations.json\n  \
        declutter --undo operations.json"
)]
pub struct Cli {
    /// Source directory to organize
    pub source: Option<PathBuf>,

    /// Destination directory
    #[arg(long, default_value = "organized", value_name = "DIR")]
    pub dest: PathBuf,

    /// Show what would be done without moving files
    #[arg(long)]
    pub dry_run: bool,

    /// Copy files instead of moving them
    #[arg(long)]
    pub copy: bool,

    /// Process subdirectories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Only process files whose name matches this regex
    #[arg(long, value_name = "REGEX")]
    pub pattern: Option<String>,

    /// Exclude files whose name matches this regex
    #[arg(long, value_name = "REGEX")]
    pub exclude: Option<String>,

    /// Minimum file size in bytes
    #[arg(long, value_name = "BYTES")]
    pub min_size: Option<u64>,

    /// Maximum file size in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_size: Option<u64>,

    /// Custom category table (JSON file)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save the operation log to this file for a later undo
    #[arg(long, value_name = "FILE")]
    pub save_log: Option<PathBuf>,

    /// Undo operations from a previously saved log
    #[arg(long, value_name = "FILE")]
    pub undo: Option<PathBuf>,

    /// Increase diagnostic verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Runs the selected mode. A returned error is a top-level failure and maps
/// to exit status 1 in `main`; per-file problems never surface here.
pub fn run(cli: Cli) -> Result<(), String> {
    if let Some(log_path) = &cli.undo {
        return run_undo(log_path, cli.dry_run);
    }

    let source = cli
        .source
        .as_deref()
        .ok_or("Source directory is required unless --undo is given")?;

    let table = config::load_category_table(cli.config.as_deref());
    let options = OrganizeOptions {
        dry_run: cli.dry_run,
        recursive: cli.recursive,
        copy: cli.copy,
        pattern: cli.pattern.clone(),
        exclude: cli.exclude.clone(),
        min_size: cli.min_size,
        max_size: cli.max_size,
    };

    if cli.dry_run {
        OutputFormatter::info(&format!("DRY RUN: Analyzing contents of: {}", source.display()));
    } else {
        OutputFormatter::info(&format!("Organizing contents of: {}", source.display()));
    }

    let organizer = Organizer::new(table, options);
    let report = organizer
        .run(source, &cli.dest)
        .map_err(|e| e.to_string())?;

    print_summary(&cli, &report);

    if !cli.dry_run
        && let Some(log_path) = &cli.save_log
    {
        if report.files_moved > 0 {
            match report.log.save(log_path) {
                Ok(()) => OutputFormatter::info(&format!(
                    "Operation log saved to {}",
                    log_path.display()
                )),
                Err(e) => {
                    OutputFormatter::warning(&format!("Could not save operation log: {}", e));
                }
            }
        } else {
            log::debug!("No operations recorded, skipping log save");
        }
    }

    Ok(())
}

/// End-of-run reporting, derived entirely from the engine's return value.
fn print_summary(cli: &Cli, report: &RunReport) {
    if cli.dry_run {
        OutputFormatter::plain(&format!(
            "\n[DRY RUN] Found {} files that would be organized",
            report.files_processed
        ));
    } else {
        OutputFormatter::header("Organization complete!");
        OutputFormatter::plain(&format!("Files processed: {}", report.files_processed));
        OutputFormatter::plain(&format!(
            "Files {}: {}",
            if cli.copy { "copied" } else { "moved" },
            report.files_moved
        ));
        if !report.failures.is_empty() {
            OutputFormatter::warning(&format!(
                "{} files could not be organized; see errors above",
                report.failures.len()
            ));
        }
    }

    if !report.category_counts.is_empty() {
        OutputFormatter::summary_table(
            &report.category_counts,
            report.category_counts.values().sum(),
        );
    }
}

/// Undo entry point: load the log, replay it, report what happened.
fn run_undo(log_path: &Path, dry_run: bool) -> Result<(), String> {
    if dry_run {
        OutputFormatter::info("DRY RUN: Analyzing previous organization...");
    } else {
        OutputFormatter::info("Undoing previous organization...");
    }

    let report = UndoManager::undo(log_path, dry_run).map_err(|e| e.to_string())?;

    OutputFormatter::plain(&format!(
        "{} {} operations",
        if dry_run { "Would undo" } else { "Undone" },
        report.undone
    ));

    if !report.skipped.is_empty() {
        OutputFormatter::plain(&format!("  Skipped: {}", report.skipped.len()));
        for (path, reason) in &report.skipped {
            OutputFormatter::plain(&format!("    - {}: {}", path.display(), reason));
        }
    }

    if !report.failed.is_empty() {
        OutputFormatter::error(&format!("  Failed: {}", report.failed.len()));
        for (path, reason) in &report.failed {
            OutputFormatter::error(&format!("    - {}: {}", path.display(), reason));
        }
    }

    Ok(())
}
