//! Disk inventory for one category root.
//!
//! The walk is a single lazy pass per root; filters run on each entry as
//! it is yielded, never on a materialized tree.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::Settings;

/// macOS resource-fork files carry this prefix and never belong to a torrent.
const RESOURCE_FORK_PREFIX: &str = "._";

/// Disk-side filters applied during the walk. Exclusion rules apply only
/// here; the tracked side is never filtered.
#[derive(Debug, Clone)]
pub struct ScanFilter {
    ignore_suffixes: HashSet<String>,
    exclude_patterns: Vec<String>,
}

impl ScanFilter {
    /// Builds a filter from an ignore-suffix set (lowercase, leading
    /// dots) and exclusion substrings (lowercased here).
    #[must_use]
    pub fn new(ignore_suffixes: HashSet<String>, exclude_patterns: &[String]) -> Self {
        Self {
            ignore_suffixes,
            exclude_patterns: exclude_patterns
                .iter()
                .map(|pattern| pattern.to_lowercase())
                .collect(),
        }
    }

    /// Builds the filter from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.ignore_suffixes.clone(),
            &settings.exclude_patterns,
        )
    }

    /// True when the file's lowercase extension (with leading dot) is ignored.
    fn ignores_suffix(&self, file: &Path) -> bool {
        file.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| {
                self.ignore_suffixes
                    .contains(&format!(".{}", extension.to_lowercase()))
            })
    }

    /// True when the relative path contains any exclusion substring,
    /// case-insensitively.
    fn excludes(&self, rel_path: &str) -> bool {
        let lowered = rel_path.to_lowercase();
        self.exclude_patterns
            .iter()
            .any(|pattern| lowered.contains(pattern))
    }
}

/// Inventory of one category root.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Regular files that passed the filters, relative to the root, sorted.
    pub files: Vec<PathBuf>,
    /// True when the configured root does not exist. The caller turns
    /// this into a warning; it is never fatal.
    pub root_missing: bool,
}

/// Walks `root` and returns every regular file that passes `filter`.
///
/// A missing root yields an empty inventory flagged `root_missing`.
/// Unreadable entries are skipped, not fatal. Returned paths are
/// relative to `root` and sorted for deterministic downstream output.
#[must_use]
pub fn files_under(root: &Path, filter: &ScanFilter) -> ScanResult {
    if !root.exists() {
        return ScanResult {
            files: Vec::new(),
            root_missing: true,
        };
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                debug!(%error, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if entry
            .file_name()
            .to_string_lossy()
            .starts_with(RESOURCE_FORK_PREFIX)
        {
            continue;
        }
        if filter.ignores_suffix(entry.path()) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        if filter.excludes(&relative.to_string_lossy()) {
            continue;
        }
        files.push(relative.to_path_buf());
    }

    files.sort();
    debug!(root = %root.display(), files = files.len(), "scanned category root");
    ScanResult {
        files,
        root_missing: false,
    }
}
