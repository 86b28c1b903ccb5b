//! dirsort - sort the files in a directory into category subfolders
//!
//! This library categorizes files by extension using a configurable
//! category map, and relocates them into per-category subdirectories with
//! collision-safe moves, optional recursion, a dry-run mode and cooperative
//! cancellation.

pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;

pub use config::{CategoryConfig, ConfigError, DEFAULT_CONFIG_FILE};
pub use file_category::{CATCH_ALL, CategoryMap};
pub use file_organizer::{
    Organizer, OrganizeError, RunOptions, RunOutcome, RunReport, resolve_collision,
};

pub use cli::{Cli, run};
