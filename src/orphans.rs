//! Per-category set difference between disk inventory and tracked files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use crate::config::Settings;
use crate::qbit::TrackedFiles;
use crate::scan::{ScanFilter, files_under};

/// Orphaned files grouped by category, plus the warnings produced while
/// scanning. Categories without orphans carry no entry, so an empty map
/// means a clean reconciliation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrphanReport {
    /// Category → fully qualified orphan paths, both sorted.
    pub orphans: BTreeMap<String, Vec<PathBuf>>,
    /// Missing-folder warnings, in configuration order.
    pub warnings: Vec<String>,
}

/// Normalizes a relative path for membership tests: backslashes become
/// forward slashes and the whole path is lowercased.
///
/// Lowercasing deliberately collapses case differences that are
/// meaningful on case-sensitive filesystems; mixed Windows/Linux mounts
/// report inconsistent casing and would otherwise produce false orphans.
#[must_use]
pub fn normalize_rel_path(raw: &str) -> String {
    raw.replace('\\', "/").to_lowercase()
}

/// Scans every configured category folder and returns the files no
/// torrent in that category references.
///
/// Categories configured but unknown to qBittorrent are still scanned:
/// every file there is an orphan. Categories qBittorrent knows but
/// with no configured folder are never scanned. Orphans keep their
/// original on-disk casing; normalization exists only for the
/// membership test.
#[must_use]
pub fn detect_orphans(settings: &Settings, tracked: &TrackedFiles) -> OrphanReport {
    let filter = ScanFilter::from_settings(settings);
    let mut report = OrphanReport::default();

    for (category, folder) in &settings.category_folders {
        let scan = files_under(folder, &filter);
        if scan.root_missing {
            report.warnings.push(format!(
                "Folder for category '{category}' does not exist: {}",
                folder.display()
            ));
            continue;
        }
        if scan.files.is_empty() {
            continue;
        }

        let known = tracked.get(category);
        let orphaned: Vec<PathBuf> = scan
            .files
            .into_iter()
            .filter(|relative| {
                let normalized = normalize_rel_path(&relative.to_string_lossy());
                !known.is_some_and(|set| set.contains(&normalized))
            })
            .map(|relative| folder.join(relative))
            .collect();

        debug!(
            category = %category,
            orphans = orphaned.len(),
            "category reconciled"
        );
        if !orphaned.is_empty() {
            report.orphans.insert(category.clone(), orphaned);
        }
    }

    report
}
