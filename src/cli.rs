//! Command-line interface module for dirsort.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and validation
//! - Configuration resolution
//! - The recursive-mode confirmation prompt
//! - Interrupt-to-cancellation wiring
//! - Run orchestration and the final summary

use crate::config::CategoryConfig;
use crate::file_category::CategoryMap;
use crate::file_organizer::{Organizer, RunOptions, RunOutcome};
use crate::output::OutputFormatter;
use clap::Parser;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};
use std::sync::atomic::Ordering;

/// Sort the files in a directory into category subfolders by extension.
#[derive(Debug, Parser)]
#[command(name = "dirsort", version)]
pub struct Cli {
    /// Directory to organize
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub path: PathBuf,

    /// Simulate the run without creating directories or moving files
    #[arg(long, visible_alias = "dryrun")]
    pub dry_run: bool,

    /// Path to a JSON category configuration file (defaults to dirsort.json
    /// in the working directory if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Descend into subdirectories; asks for confirmation first since the
    /// existing directory layout is flattened
    #[arg(short, long)]
    pub recursive: bool,

    /// Answer yes to the recursive confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Runs the CLI application with the given arguments.
///
/// This is the main entry point for CLI operations: it resolves the
/// configuration, confirms recursive runs, wires Ctrl+C to the cancellation
/// flag and executes the run. The summary is always emitted on normal
/// (including cancelled) completion; fatal conditions propagate as an error
/// string for `main` to report with a non-zero exit.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use dirsort::cli::{Cli, run};
///
/// let cli = Cli::parse_from(["dirsort", "--dry-run", "/tmp/downloads"]);
/// if let Err(e) = run(cli) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run(cli: Cli) -> Result<(), String> {
    let config = CategoryConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let mapper = CategoryMap::from_config(&config);

    let options = RunOptions {
        dry_run: cli.dry_run,
        recursive: cli.recursive,
    };
    // Constructing the organizer validates the root, so a mistyped path
    // fails before the user is asked anything
    let organizer = Organizer::new(&cli.path, mapper, options).map_err(|e| e.to_string())?;

    if cli.recursive && !cli.yes && !confirm_recursive(organizer.root())? {
        OutputFormatter::plain("Aborted.");
        return Ok(());
    }

    OutputFormatter::info(&format!(
        "Organizing contents of: {}",
        organizer.root().display()
    ));
    if cli.dry_run {
        OutputFormatter::dry_run_notice("No directories will be created and no files will be moved.");
    }

    let cancel = organizer.cancellation_flag();
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupt received, stopping...");
        cancel.store(true, Ordering::Relaxed);
    })
    .map_err(|e| format!("Error registering interrupt handler: {}", e))?;

    let report = organizer.run().map_err(|e| e.to_string())?;

    if report.outcome == RunOutcome::Cancelled {
        OutputFormatter::warning("Cancelled. Files already moved were kept in place.");
    }
    OutputFormatter::summary(report.processed, report.errors);

    Ok(())
}

/// Asks the user to confirm a recursive run.
fn confirm_recursive(root: &Path) -> Result<bool, String> {
    Confirm::new()
        .with_prompt(format!(
            "Recursively organize every file under {}? The subdirectory layout will be flattened",
            root.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| format!("Error reading confirmation: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_requires_path() {
        let result = Cli::try_parse_from(["dirsort"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["dirsort", "/tmp/downloads"]).expect("parse failed");
        assert_eq!(cli.path, PathBuf::from("/tmp/downloads"));
        assert!(!cli.dry_run);
        assert!(!cli.recursive);
        assert!(!cli.yes);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "dirsort",
            "--dry-run",
            "--config",
            "cats.json",
            "-r",
            "-y",
            "/tmp/downloads",
        ])
        .expect("parse failed");
        assert!(cli.dry_run);
        assert!(cli.recursive);
        assert!(cli.yes);
        assert_eq!(cli.config, Some(PathBuf::from("cats.json")));
    }

    #[test]
    fn test_parse_dryrun_alias() {
        let cli = Cli::try_parse_from(["dirsort", "--dryrun", "/tmp/x"]).expect("parse failed");
        assert!(cli.dry_run);
    }

    #[test]
    fn test_run_with_missing_root_is_error() {
        let cli = Cli::try_parse_from(["dirsort", "/nonexistent/dirsort/root"])
            .expect("parse failed");
        let result = run(cli);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_recursive_with_missing_root_fails_before_prompt() {
        // With -r and no -y, a bad root must fail validation instead of
        // reaching the interactive confirmation (which has no terminal here)
        let cli = Cli::try_parse_from(["dirsort", "-r", "/nonexistent/dirsort/root"])
            .expect("parse failed");
        let result = run(cli);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid root path"));
    }

    #[test]
    fn test_run_with_missing_config_is_error() {
        let cli = Cli::try_parse_from(["dirsort", "--config", "/nonexistent/cats.json", "/tmp"])
            .expect("parse failed");
        let result = run(cli);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("configuration"));
    }
}
