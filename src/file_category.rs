/// File categorization by extension.
///
/// This module maps file extensions to configured category names. The mapping
/// is built once from a [`CategoryConfig`](crate::config::CategoryConfig) and
/// is immutable for the duration of a run, which keeps categorization a pure
/// function of its inputs.
///
/// # Examples
///
/// ```
/// use dirsort::config::CategoryConfig;
/// use dirsort::file_category::{CATCH_ALL, CategoryMap};
/// use std::path::Path;
///
/// let map = CategoryMap::from_config(&CategoryConfig::default());
/// assert_eq!(map.categorize(Path::new("movie.mp4")), "video");
/// assert_eq!(map.categorize(Path::new("archive.zip")), CATCH_ALL);
/// ```
use crate::config::CategoryConfig;
use std::collections::HashMap;
use std::path::Path;

/// Name of the catch-all category for files no configured category claims.
pub const CATCH_ALL: &str = "mix";

/// Maps lower-cased file extensions (with leading dot) to category names.
///
/// If a configuration assigns the same extension to more than one category,
/// the lexicographically first category name wins. Sorting the names before
/// flattening makes the tie-break deterministic across runs instead of
/// depending on map iteration order.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    /// Configured category names, sorted.
    names: Vec<String>,
    /// Extension (".ext", lower-case) → index into `names`.
    extensions: HashMap<String, usize>,
}

impl CategoryMap {
    /// Builds the lookup table from a raw configuration.
    ///
    /// Extensions are trimmed, lower-cased, and given a leading dot if the
    /// configuration omitted one. Empty extension entries are ignored.
    pub fn from_config(config: &CategoryConfig) -> Self {
        let mut names: Vec<String> = config.categories.keys().cloned().collect();
        names.sort();

        let mut extensions = HashMap::new();
        for (index, name) in names.iter().enumerate() {
            if let Some(exts) = config.categories.get(name) {
                for ext in exts {
                    if let Some(normalized) = normalize_extension(ext) {
                        // First category (in sorted order) claiming an extension wins
                        extensions.entry(normalized).or_insert(index);
                    }
                }
            }
        }

        Self { names, extensions }
    }

    /// Returns the category name for a file path.
    ///
    /// The extension (everything after the last dot) is compared
    /// case-insensitively. Files with no extension, or with an extension no
    /// category claims, fall to [`CATCH_ALL`].
    pub fn categorize(&self, path: &Path) -> &str {
        let Some(ext) = path.extension() else {
            return CATCH_ALL;
        };

        let key = format!(".{}", ext.to_string_lossy().to_lowercase());
        match self.extensions.get(&key) {
            Some(&index) => &self.names[index],
            None => CATCH_ALL,
        }
    }

    /// Iterates over the configured category names in sorted order.
    ///
    /// Does not include [`CATCH_ALL`] unless it was explicitly configured.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Normalizes a configured extension to ".ext" in lower-case.
fn normalize_extension(ext: &str) -> Option<String> {
    let trimmed = ext.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }

    let lower = trimmed.to_lowercase();
    if lower.starts_with('.') {
        Some(lower)
    } else {
        Some(format!(".{}", lower))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map_from(entries: &[(&str, &[&str])]) -> CategoryMap {
        let categories: HashMap<String, Vec<String>> = entries
            .iter()
            .map(|(name, exts)| {
                (
                    name.to_string(),
                    exts.iter().map(|e| e.to_string()).collect(),
                )
            })
            .collect();
        CategoryMap::from_config(&CategoryConfig { categories })
    }

    #[test]
    fn test_categorize_known_extensions() {
        let map = map_from(&[
            ("video", &[".mp4", ".mkv", ".avi"]),
            ("audio", &[".mp3", ".wav"]),
            ("docs", &[".pdf", ".txt"]),
            ("images", &[".jpg", ".png"]),
        ]);

        assert_eq!(map.categorize(Path::new("movie.mp4")), "video");
        assert_eq!(map.categorize(Path::new("clip.mkv")), "video");
        assert_eq!(map.categorize(Path::new("song.mp3")), "audio");
        assert_eq!(map.categorize(Path::new("report.pdf")), "docs");
        assert_eq!(map.categorize(Path::new("photo.png")), "images");
    }

    #[test]
    fn test_categorize_is_case_insensitive_on_extension() {
        let map = map_from(&[("video", &[".mkv"])]);

        assert_eq!(map.categorize(Path::new("CLIP.mKv")), "video");
        assert_eq!(map.categorize(Path::new("clip.MKV")), "video");
    }

    #[test]
    fn test_unknown_extension_falls_to_catch_all() {
        let map = CategoryMap::from_config(&CategoryConfig::default());
        assert_eq!(map.categorize(Path::new("archive.zip")), CATCH_ALL);
    }

    #[test]
    fn test_no_extension_falls_to_catch_all() {
        let map = CategoryMap::from_config(&CategoryConfig::default());
        assert_eq!(map.categorize(Path::new("README")), CATCH_ALL);
    }

    #[test]
    fn test_only_last_extension_counts() {
        let map = map_from(&[("archives", &[".gz"]), ("docs", &[".tar"])]);
        assert_eq!(map.categorize(Path::new("backup.tar.gz")), "archives");
    }

    #[test]
    fn test_extensions_normalized_on_load() {
        // Missing dot, mixed case and surrounding whitespace are all accepted
        let map = map_from(&[("images", &["PNG", " .Jpg ", ""])]);

        assert_eq!(map.categorize(Path::new("a.png")), "images");
        assert_eq!(map.categorize(Path::new("b.jpg")), "images");
    }

    #[test]
    fn test_duplicate_extension_tie_break_is_deterministic() {
        // Both categories claim ".x"; the lexicographically first name wins
        let map = map_from(&[("zeta", &[".x"]), ("alpha", &[".x"])]);
        assert_eq!(map.categorize(Path::new("file.x")), "alpha");

        // Declaration order in the slice has no effect
        let map = map_from(&[("alpha", &[".x"]), ("zeta", &[".x"])]);
        assert_eq!(map.categorize(Path::new("file.x")), "alpha");
    }

    #[test]
    fn test_category_names_sorted() {
        let map = map_from(&[("video", &[".mp4"]), ("audio", &[".mp3"])]);
        let names: Vec<&str> = map.category_names().collect();
        assert_eq!(names, vec!["audio", "video"]);
    }

    #[test]
    fn test_category_names_are_case_sensitive() {
        let map = map_from(&[("Video", &[".mp4"])]);
        assert_eq!(map.categorize(Path::new("a.mp4")), "Video");
    }
}
