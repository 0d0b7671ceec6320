//! Environment-backed configuration for the orphan scan.
//!
//! All values come from environment variables with documented defaults.
//! Parsing is split into pure functions that return warnings as values;
//! the CLI layer decides how to surface them.

use std::collections::{BTreeMap, HashSet};
use std::env;
use std::path::PathBuf;

/// Default qBittorrent Web UI URL.
pub const DEFAULT_HOST: &str = "http://qbittorrent:8080";
/// Default qBittorrent username.
pub const DEFAULT_USER: &str = "admin";
/// Default qBittorrent password. Plaintext defaults are acceptable only
/// in trusted deployments where the Web UI is not exposed.
pub const DEFAULT_PASS: &str = "password";

const DEFAULT_CATEGORY_FOLDERS: &str = "Films=W:\\Films;Shows=X:\\Series";

/// File suffixes always ignored on the disk side (metadata, images, subtitles).
pub const DEFAULT_IGNORE_SUFFIXES: &[&str] = &[
    ".nfo", ".jpg", ".jpeg", ".png", ".svg", ".bin", ".txt", ".srt", ".sub", ".idx",
];

/// Resolved configuration, constructed once at startup and passed by
/// reference to each pipeline stage.
#[derive(Debug, Clone)]
pub struct Settings {
    /// qBittorrent Web UI base URL, trailing slashes stripped.
    pub host: String,
    /// Web UI username.
    pub username: String,
    /// Web UI password.
    pub password: String,
    /// Category label to filesystem root folder.
    pub category_folders: BTreeMap<String, PathBuf>,
    /// Substrings excluding a relative path from the disk inventory,
    /// matched case-insensitively.
    pub exclude_patterns: Vec<String>,
    /// Merged ignore-suffix set, every entry lowercase with a leading dot.
    pub ignore_suffixes: HashSet<String>,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// Returns the settings plus warnings for malformed
    /// `CATEGORY_FOLDERS` entries. Malformed entries drop that one
    /// mapping and are never fatal.
    #[must_use]
    pub fn from_env() -> (Self, Vec<String>) {
        let host = trimmed_env("QBIT_HOST", DEFAULT_HOST)
            .trim_end_matches('/')
            .to_string();
        let username = trimmed_env("QBIT_USER", DEFAULT_USER);
        let password = trimmed_env("QBIT_PASS", DEFAULT_PASS);

        let (category_folders, warnings) =
            parse_category_map(&trimmed_env("CATEGORY_FOLDERS", DEFAULT_CATEGORY_FOLDERS));
        let exclude_patterns = parse_list(&trimmed_env("EXCLUDE_PATTERNS", ""));
        let ignore_suffixes = merge_ignore_suffixes(&parse_list(&trimmed_env("IGNORE_SUFFIXES", "")));

        (
            Self {
                host,
                username,
                password,
                category_folders,
                exclude_patterns,
                ignore_suffixes,
            },
            warnings,
        )
    }
}

/// Reads an environment variable, falling back to `default`, and trims
/// the surrounding quote characters some shells add.
fn trimmed_env(name: &str, default: &str) -> String {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.trim_matches([' ', '"', '\'']).to_string()
}

/// Parses a comma-separated list, dropping empty segments.
#[must_use]
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Converts `Films=W:\Films;Shows=/mnt/shows` into a category → folder
/// map. A segment without `=` is skipped and reported as a warning.
#[must_use]
pub fn parse_category_map(raw: &str) -> (BTreeMap<String, PathBuf>, Vec<String>) {
    let mut mapping = BTreeMap::new();
    let mut warnings = Vec::new();

    for pair in raw.split(';').filter(|pair| !pair.trim().is_empty()) {
        let Some((category, folder)) = pair.split_once('=') else {
            warnings.push(format!(
                "Skipping malformed CATEGORY_FOLDERS entry: {pair:?}"
            ));
            continue;
        };
        mapping.insert(
            category.trim().to_string(),
            PathBuf::from(folder.trim()),
        );
    }

    (mapping, warnings)
}

/// Merges extra suffixes into the default ignore set. Extras are
/// lowercased and given a leading dot when missing one, so membership
/// tests against lowercase extensions stay consistent.
#[must_use]
pub fn merge_ignore_suffixes(extra: &[String]) -> HashSet<String> {
    let mut suffixes: HashSet<String> = DEFAULT_IGNORE_SUFFIXES
        .iter()
        .map(ToString::to_string)
        .collect();
    for suffix in extra {
        let lowered = suffix.to_lowercase();
        if lowered.starts_with('.') {
            suffixes.insert(lowered);
        } else {
            suffixes.insert(format!(".{lowered}"));
        }
    }
    suffixes
}
