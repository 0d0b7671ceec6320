//! CLI argument definitions using clap derive macros.

use clap::Parser;

/// Report files on disk that no qBittorrent torrent references.
///
/// Connects to the qBittorrent Web API, fetches every torrent's file
/// manifest, walks the configured category folders, and prints the
/// files nothing tracks. Configuration comes from environment
/// variables (QBIT_HOST, QBIT_USER, QBIT_PASS, CATEGORY_FOLDERS,
/// EXCLUDE_PATTERNS, IGNORE_SUFFIXES).
#[derive(Parser, Debug)]
#[command(name = "qbit-orphans")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["qbit-orphans"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["qbit-orphans", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["qbit-orphans", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["qbit-orphans", "--quiet"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_rejects_positional_arguments() {
        let result = Args::try_parse_from(["qbit-orphans", "stray"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let result = Args::try_parse_from(["qbit-orphans", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
