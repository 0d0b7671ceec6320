//! CLI entry point for the qBittorrent orphan report.

use std::io;

use anyhow::Result;
use clap::Parser;
use qbit_orphans::{QbitClient, Settings, detect_orphans, render};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let (settings, config_warnings) = Settings::from_env();
    for warning in &config_warnings {
        println!("⚠️  {warning}");
    }
    info!(
        host = %settings.host,
        categories = settings.category_folders.len(),
        "starting orphan scan"
    );

    // Authentication failure or any API error aborts here, before any
    // disk scan, with a non-zero exit.
    let client = QbitClient::new(&settings.host);
    client.login(&settings.username, &settings.password).await?;

    let tracked = client.tracked_files().await?;
    debug!(categories = tracked.len(), "torrent manifest fetched");

    let report = detect_orphans(&settings, &tracked);
    render(&report, &mut io::stdout().lock())?;

    Ok(())
}
