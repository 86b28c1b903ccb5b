//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output: colored status
//! messages, the per-run reporter used while walking, and the final summary.
//! Keeping formatting here makes it easy to change the styling globally.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;

/// Manages all CLI output with consistent styling.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a dry-run notice in yellow.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a spinner that tracks how many files have been processed.
    ///
    /// The walk streams entries, so the total is unknown up front; a spinner
    /// with a running count is used instead of a bounded bar.
    pub fn create_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {pos} files processed")
                .expect("Invalid progress bar template"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Prints the end-of-run summary with processed and error counts.
    pub fn summary(processed: usize, errors: usize) {
        println!("\n{}", "SUMMARY".bold());
        println!(
            "Processed: {} {}",
            processed.to_string().green(),
            if processed == 1 { "file" } else { "files" }
        );
        if errors > 0 {
            println!("Errors:    {}", errors.to_string().red());
        } else {
            println!("Errors:    {}", "0".green());
        }
    }
}

/// Per-run logging facade used by the organizer while walking.
///
/// In a real run, lines are routed through the spinner so they appear above
/// it; in dry-run mode there is no spinner and lines go straight to stdout.
pub struct RunReporter {
    spinner: Option<ProgressBar>,
}

impl RunReporter {
    pub fn new(dry_run: bool) -> Self {
        let spinner = (!dry_run).then(OutputFormatter::create_spinner);
        Self { spinner }
    }

    fn println(&self, line: &str) {
        match &self.spinner {
            Some(pb) => pb.println(line),
            None => println!("{}", line),
        }
    }

    /// Logs a directory that would be created (dry-run only).
    pub fn would_create_dir(&self, path: &Path) {
        OutputFormatter::dry_run_notice(&format!("Would create directory: {}", path.display()));
    }

    /// Logs a prospective move (dry-run only).
    pub fn would_move(&self, from: &Path, to: &Path, category: &str) {
        OutputFormatter::dry_run_notice(&format!(
            "Would move: {} -> {} ({})",
            from.display(),
            to.display(),
            category
        ));
    }

    /// Logs a completed move and advances the spinner.
    pub fn moved(&self, from: &Path, to: &Path, category: &str) {
        self.println(&format!(
            "{} Moved: {} -> {} ({})",
            "✓".green(),
            from.display(),
            to.display(),
            category
        ));
        if let Some(pb) = &self.spinner {
            pb.inc(1);
        }
    }

    /// Logs a per-entry failure that the walk skipped over.
    ///
    /// Always lands on stderr: the spinner's draw target is stderr, and the
    /// dry-run path goes through [`OutputFormatter::error`].
    pub fn entry_error(&self, message: &str) {
        match &self.spinner {
            Some(pb) => pb.println(format!("{} {}", "✗".red(), message)),
            None => OutputFormatter::error(message),
        }
    }

    /// Clears the spinner at the end of the run.
    pub fn finish(&self) {
        if let Some(pb) = &self.spinner {
            pb.finish_and_clear();
        }
    }
}
