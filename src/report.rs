//! Human-readable rendering of the orphan report.

use std::fs;
use std::io::{self, Write};

use crate::orphans::OrphanReport;

const SIZE_UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

/// Formats a byte count with binary (1024-based) units, rounded to the
/// nearest integer with thousands separators, capped at TiB.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn human_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in &SIZE_UNITS[..SIZE_UNITS.len() - 1] {
        if value < 1024.0 {
            return format!("{} {unit}", group_thousands(value.round() as u64));
        }
        value /= 1024.0;
    }
    format!("{} TiB", group_thousands(value.round() as u64))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Writes the report to `out`.
///
/// Warnings first (glyph-prefixed), then either the single success line
/// or one block per category: a blank line, the header, and each orphan
/// with its size. A file that vanished between scan and stat renders a
/// `(missing?)` marker instead of failing the run.
///
/// # Errors
///
/// Returns an error only when writing to `out` fails.
pub fn render(report: &OrphanReport, out: &mut impl Write) -> io::Result<()> {
    for warning in &report.warnings {
        writeln!(out, "⚠️  {warning}")?;
    }

    if report.orphans.is_empty() {
        writeln!(out, "✅  No orphaned files found.")?;
        return Ok(());
    }

    for (category, paths) in &report.orphans {
        writeln!(out)?;
        writeln!(out, "===== {category} =====")?;
        for path in paths {
            match fs::metadata(path) {
                Ok(metadata) => writeln!(
                    out,
                    "{}    ({})",
                    path.display(),
                    human_size(metadata.len())
                )?,
                Err(_) => writeln!(out, "{}    (missing?)", path.display())?,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn render_to_string(report: &OrphanReport) -> String {
        let mut out = Vec::new();
        render(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_human_size_bytes() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(1023), "1,023 B");
    }

    #[test]
    fn test_human_size_scales_through_binary_units() {
        assert_eq!(human_size(1024), "1 KiB");
        assert_eq!(human_size(1536), "2 KiB");
        assert_eq!(human_size(1024 * 1024), "1 MiB");
        assert_eq!(human_size(1024 * 1024 * 1024), "1 GiB");
        assert_eq!(human_size(1024_u64.pow(4)), "1 TiB");
    }

    #[test]
    fn test_human_size_caps_at_tib() {
        assert_eq!(human_size(3 * 1024_u64.pow(5)), "3,072 TiB");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }

    #[test]
    fn test_render_empty_report_prints_success_line() {
        let output = render_to_string(&OrphanReport::default());
        assert_eq!(output, "✅  No orphaned files found.\n");
    }

    #[test]
    fn test_render_warnings_precede_success_line() {
        let report = OrphanReport {
            orphans: BTreeMap::new(),
            warnings: vec!["Folder for category 'Films' does not exist: /mnt/films".to_string()],
        };
        let output = render_to_string(&report);
        assert!(output.starts_with("⚠️  Folder for category 'Films'"));
        assert!(output.ends_with("✅  No orphaned files found.\n"));
    }

    #[test]
    fn test_render_lists_orphans_with_sizes_under_sorted_headers() {
        let temp = TempDir::new().unwrap();
        let film = temp.path().join("film.mkv");
        fs::write(&film, vec![0_u8; 2048]).unwrap();

        let report = OrphanReport {
            orphans: BTreeMap::from([("Films".to_string(), vec![film.clone()])]),
            warnings: Vec::new(),
        };
        let output = render_to_string(&report);
        assert!(output.contains("===== Films ====="));
        assert!(
            output.contains(&format!("{}    (2 KiB)", film.display())),
            "got: {output}"
        );
        assert!(!output.contains("No orphaned files found"));
    }

    #[test]
    fn test_render_marks_vanished_files_as_missing() {
        let report = OrphanReport {
            orphans: BTreeMap::from([(
                "Films".to_string(),
                vec![PathBuf::from("/definitely/not/here.mkv")],
            )]),
            warnings: Vec::new(),
        };
        let output = render_to_string(&report);
        assert!(
            output.contains("/definitely/not/here.mkv    (missing?)"),
            "got: {output}"
        );
    }

    #[test]
    fn test_render_categories_in_sorted_order() {
        let report = OrphanReport {
            orphans: BTreeMap::from([
                ("Shows".to_string(), vec![PathBuf::from("/x/a.mkv")]),
                ("Films".to_string(), vec![PathBuf::from("/y/b.mkv")]),
            ]),
            warnings: Vec::new(),
        };
        let output = render_to_string(&report);
        let films = output.find("===== Films =====").unwrap();
        let shows = output.find("===== Shows =====").unwrap();
        assert!(films < shows);
    }
}
