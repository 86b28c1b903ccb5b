//! Category configuration loading.
//!
//! Categories are configured as a JSON object whose keys are category names
//! and whose values are arrays of extension strings:
//!
//! ```json
//! {
//!     "video": [".mp4", ".mkv"],
//!     "audio": [".mp3", ".FLAC"],
//!     "docs": [".pdf", ".txt"]
//! }
//! ```
//!
//! Extensions may be written in any case and with or without the leading dot;
//! they are normalized when the lookup table is built. Resolution order:
//! an explicitly requested file (missing one is a fatal error), then
//! `dirsort.json` in the working directory, then the built-in defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration filename looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dirsort.json";

/// Errors that can occur while loading the category configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid JSON syntax or structure.
    ConfigInvalid(String),
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// The raw category → extensions mapping as read from disk.
///
/// Category names are kept as configured (case-sensitive); extensions are
/// normalized later by [`crate::file_category::CategoryMap`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryConfig {
    pub categories: HashMap<String, Vec<String>>,
}

impl CategoryConfig {
    /// Load configuration, with fallback to built-in defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `dirsort.json` in the current directory
    /// 3. Fall back to the default categories
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly provided configuration file is
    /// missing or malformed, or if the default-named file exists but cannot
    /// be parsed. Absence of the default-named file is not an error.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ConfigNotFound` if the file does not exist.
    /// Returns `ConfigError::ConfigInvalid` if JSON parsing fails.
    /// Returns `ConfigError::IoError` if the file cannot be read.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }
}

impl Default for CategoryConfig {
    fn default() -> Self {
        let categories = HashMap::from([
            (
                "video".to_string(),
                vec![".mp4".to_string(), ".mkv".to_string(), ".avi".to_string()],
            ),
            (
                "audio".to_string(),
                vec![".mp3".to_string(), ".wav".to_string(), ".flac".to_string()],
            ),
            (
                "docs".to_string(),
                vec![
                    ".pdf".to_string(),
                    ".docx".to_string(),
                    ".txt".to_string(),
                    ".md".to_string(),
                ],
            ),
        ]);

        Self { categories }
    }
}
