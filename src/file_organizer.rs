/// Directory walking and file moving.
///
/// This module drives a single organization run: it ensures the category
/// output directories exist, walks the target tree, classifies each regular
/// file and moves it into `<root>/<category>/`, resolving name collisions
/// with numeric suffixes. The walk polls a shared cancellation flag once per
/// entry so an interrupt stops the run between moves; individual moves are
/// single atomic renames, so no partial file state is left behind.
use crate::file_category::{CATCH_ALL, CategoryMap};
use crate::output::RunReporter;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use walkdir::WalkDir;

/// Per-run settings, immutable once the run starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Log prospective actions without touching the filesystem.
    pub dry_run: bool,
    /// Descend into subdirectories instead of only processing root-level files.
    pub recursive: bool,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every entry was visited.
    Completed,
    /// The cancellation flag was set before the walk finished. Files already
    /// moved stay in place; nothing is rolled back.
    Cancelled,
}

/// Counters and outcome for one run, discarded after the summary.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Files moved (or, in dry-run mode, files that would have been moved).
    pub processed: usize,
    /// Entry-access and move failures that were logged and skipped.
    pub errors: usize,
    pub outcome: RunOutcome,
}

/// Errors that abort a run before or during the walk.
///
/// Per-entry failures (an unreadable file, a failed rename) are not
/// represented here at the run level; they are logged, counted in
/// [`RunReport::errors`] and the walk continues.
#[derive(Debug)]
pub enum OrganizeError {
    /// The root path is missing or is not a directory.
    InvalidRootPath {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a category output directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its category directory.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// Enumerating the directory tree itself failed.
    WalkFailed { source: walkdir::Error },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRootPath { path, source } => {
                write!(f, "Invalid root path {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::WalkFailed { source } => {
                write!(f, "Failed to walk directory tree: {}", source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Returns a destination path that does not currently exist.
///
/// If `desired` is free it is returned unchanged. Otherwise siblings named
/// `<stem>_1<.ext>`, `<stem>_2<.ext>`, … are tried until one is free. The
/// check-then-rename window is accepted: the tool is single-threaded and no
/// external writer is expected during a run.
pub fn resolve_collision(desired: &Path) -> PathBuf {
    if !desired.exists() {
        return desired.to_path_buf();
    }

    let dir = desired.parent().unwrap_or(Path::new(""));
    let stem = desired
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());
    let ext = desired.extension().map(|e| e.to_string_lossy().into_owned());

    let mut counter: u64 = 1;
    loop {
        let candidate_name = match &ext {
            Some(ext) => format!("{}_{}.{}", stem, counter, ext),
            None => format!("{}_{}", stem, counter),
        };
        let candidate = dir.join(candidate_name);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Walks a directory tree and moves files into category subdirectories.
pub struct Organizer {
    root: PathBuf,
    options: RunOptions,
    mapper: CategoryMap,
    /// Absolute paths of every category output directory plus the catch-all.
    /// Used to recognize and skip already-organized locations during the walk.
    target_dirs: HashSet<PathBuf>,
    cancel: Arc<AtomicBool>,
}

impl Organizer {
    /// Creates an organizer for `root`, validating the path up front.
    ///
    /// The root must exist and be a directory; it is resolved to an absolute
    /// path so that destination comparisons during the walk are exact.
    ///
    /// # Errors
    ///
    /// Returns `OrganizeError::InvalidRootPath` if the root is missing, not
    /// a directory, or cannot be resolved.
    pub fn new(root: &Path, mapper: CategoryMap, options: RunOptions) -> OrganizeResult<Self> {
        let metadata = fs::metadata(root).map_err(|e| OrganizeError::InvalidRootPath {
            path: root.to_path_buf(),
            source: e,
        })?;
        if !metadata.is_dir() {
            return Err(OrganizeError::InvalidRootPath {
                path: root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
            });
        }

        let root = std::path::absolute(root).map_err(|e| OrganizeError::InvalidRootPath {
            path: root.to_path_buf(),
            source: e,
        })?;

        let mut target_dirs: HashSet<PathBuf> = mapper
            .category_names()
            .map(|name| root.join(name))
            .collect();
        target_dirs.insert(root.join(CATCH_ALL));

        Ok(Self {
            root,
            options,
            mapper,
            target_dirs,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// The resolved absolute root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns a handle to the cancellation flag.
    ///
    /// Setting the flag (typically from a signal handler) stops the walk
    /// before the next entry is processed.
    pub fn cancellation_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Performs one organization run.
    ///
    /// Ensures the output directories exist, then walks the tree file by
    /// file. Per-entry failures are logged and counted without aborting the
    /// walk; a failure to enumerate the root itself is terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if an output directory cannot be created or the walk
    /// fails outright. Per-file move errors only show up in the report.
    pub fn run(&self) -> OrganizeResult<RunReport> {
        let reporter = RunReporter::new(self.options.dry_run);
        // The reporter owns the spinner; clear it even when the run
        // terminates with an error
        let result = self.run_with_reporter(&reporter);
        reporter.finish();
        result
    }

    fn run_with_reporter(&self, reporter: &RunReporter) -> OrganizeResult<RunReport> {
        self.ensure_target_dirs(reporter)?;

        let mut processed = 0usize;
        let mut errors = 0usize;
        let mut outcome = RunOutcome::Completed;

        let mut walker = if self.options.recursive {
            WalkDir::new(&self.root)
        } else {
            WalkDir::new(&self.root).max_depth(1)
        }
        .into_iter();

        while let Some(entry) = walker.next() {
            if self.cancel.load(Ordering::Relaxed) {
                outcome = RunOutcome::Cancelled;
                break;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Failing on the root itself means the walk cannot proceed
                    if err.depth() == 0 {
                        return Err(OrganizeError::WalkFailed { source: err });
                    }
                    let path = err
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    reporter.entry_error(&format!("Error accessing {}: {}", path, err));
                    errors += 1;
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                // Never descend into an output directory, so files moved
                // earlier in the run are not picked up again
                if entry.depth() > 0 && self.target_dirs.contains(entry.path()) {
                    walker.skip_current_dir();
                }
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }

            match self.process_file(entry.path(), reporter) {
                Ok(moved) => {
                    if moved {
                        processed += 1;
                    }
                }
                Err(e) => {
                    reporter.entry_error(&e.to_string());
                    errors += 1;
                }
            }
        }

        Ok(RunReport {
            processed,
            errors,
            outcome,
        })
    }

    /// Creates every category output directory plus the catch-all.
    ///
    /// In dry-run mode the creations are only logged.
    fn ensure_target_dirs(&self, reporter: &RunReporter) -> OrganizeResult<()> {
        let mut dirs: Vec<&PathBuf> = self.target_dirs.iter().collect();
        dirs.sort();

        for dir in dirs {
            if self.options.dry_run {
                reporter.would_create_dir(dir);
            } else {
                fs::create_dir_all(dir).map_err(|e| OrganizeError::DirectoryCreationFailed {
                    path: dir.clone(),
                    source: e,
                })?;
            }
        }
        Ok(())
    }

    /// Classifies and moves a single file. Returns `Ok(true)` if the file
    /// was moved (or would be in dry-run mode), `Ok(false)` if it was
    /// skipped because it already sits at its destination.
    fn process_file(&self, path: &Path, reporter: &RunReporter) -> OrganizeResult<bool> {
        let category = self.mapper.categorize(path);

        let Some(file_name) = path.file_name() else {
            return Ok(false);
        };
        let destination = self.root.join(category).join(file_name);

        // Already organized
        if path == destination {
            return Ok(false);
        }

        if self.options.dry_run {
            reporter.would_move(path, &destination, category);
            return Ok(true);
        }

        let final_destination = resolve_collision(&destination);
        fs::rename(path, &final_destination).map_err(|e| OrganizeError::FileMoveFailure {
            source: path.to_path_buf(),
            destination: final_destination.clone(),
            source_error: e,
        })?;
        reporter.moved(path, &final_destination, category);

        Ok(true)
    }
}
