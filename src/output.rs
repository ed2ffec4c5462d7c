//! Console output formatting.
//!
//! Centralizes all user-facing output: colored status lines, dry-run
//! notices, the end-of-run summary table, and the transfer progress bar.
//! Everything printed here is derived from engine return values; the engine
//! itself only emits per-file lines through the progress bar handle.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;

/// Styled console output helpers.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Success message, green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Error message, red with an X mark, on stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Warning message, yellow.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Informational message, cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Unstyled message.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Bold section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Yellow `[DRY RUN]` prefixed line.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Progress bar for a live transfer loop over `total` candidates.
    ///
    /// Per-file lines should go through [`ProgressBar::println`] so they do
    /// not clobber the bar.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Per-category summary table with a total row.
    pub fn summary_table(category_counts: &HashMap<String, usize>, total_files: usize) {
        Self::header("SUMMARY");

        // Sort categories for consistent output
        let mut categories: Vec<_> = category_counts.iter().collect();
        categories.sort_by_key(|&(name, _)| name);

        let max_category_len = categories
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(8);

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = max_category_len
        );
        println!("{}", "-".repeat(max_category_len + 10));

        for (category, count) in &categories {
            let file_word = if **count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                file_word,
                width = max_category_len
            );
        }

        println!("{}", "-".repeat(max_category_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total_files.to_string().green().bold(),
            if total_files == 1 { "file" } else { "files" },
            width = max_category_len
        );
    }
}
