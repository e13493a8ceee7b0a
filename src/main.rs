//! CLI entry point for the imageset downloader.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use imageset_core::{DownloadEngine, HttpClient, logging, read_input_urls};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before logging, so --help works without logs)
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

    // The guard owns the log writer's worker thread; keep it alive until
    // exit so buffered records are flushed.
    let _log_guard = logging::init(&args.log_file, default_level)?;

    debug!(?args, "CLI arguments parsed");
    info!("Imageset downloader starting");

    let urls = read_input_urls(&args.input_urls_path)?;
    info!(urls = urls.len(), "parsed input URLs");

    let client = Arc::new(HttpClient::with_timeout(Duration::from_secs(
        args.timeout_secs,
    )));
    let engine = DownloadEngine::new(usize::from(args.concurrency))?.with_progress();

    let summary = engine.run(&urls, client, &args.output_dir).await?;

    info!(
        succeeded = summary.succeeded(),
        failed = summary.failed(),
        total = summary.total(),
        "download complete"
    );
    // Partial failure is a normal operating condition for noisy URL lists:
    // report the tally and exit 0.
    println!(
        "Successfully downloaded {}/{} images",
        summary.succeeded(),
        summary.total()
    );

    Ok(())
}
