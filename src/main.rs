//! Main entry point for thumbgrab CLI

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use thumbgrab::cli::{Args, OutputFormatter};
use thumbgrab::core::VideoManager;
use thumbgrab::download::BatchDownloader;
use thumbgrab::fetch::HttpFetcher;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse command line arguments
    let args = Args::parse();

    info!("Starting thumbgrab with args: {:?}", args);

    // Initialize output formatter
    let formatter = Arc::new(OutputFormatter::new(args.verbosity_level()));

    let inputs = args.collect_inputs()?;
    if inputs.is_empty() {
        formatter.print_help();
        return Ok(());
    }

    // One fetcher shared by enrichment and the batch downloader
    let fetcher = Arc::new(HttpFetcher::with_config(args.fetcher_config())?);

    // Resolve all submitted URLs and wait for enrichment to settle
    formatter.info(&format!("Resolving {} URL(s)...", inputs.len()));
    let mut manager = VideoManager::new(fetcher.clone());
    manager.submit(&inputs).await;
    manager.drain_enrichment().await;

    for entry in manager.videos() {
        formatter.print_entry(entry);
    }

    let ready = manager.ready_videos().len();
    let failed = manager.videos().iter().filter(|e| e.is_failed()).count();
    formatter.print_submit_summary(ready, failed);

    if args.dry_run || ready == 0 {
        return Ok(());
    }

    // Download thumbnails sequentially
    let start_time = Instant::now();
    formatter.print_batch_start(ready, args.quality);
    if !args.no_progress {
        formatter.create_batch_bar(ready as u64);
    }

    let mut downloader = BatchDownloader::new(fetcher).with_keep_going(args.keep_going);
    let formatter_clone = formatter.clone();
    downloader = downloader.with_progress(move |progress| {
        formatter_clone.update_batch(&progress);
    });

    match downloader
        .download_all(manager.videos(), args.quality, &args.output)
        .await
    {
        Ok(report) => {
            formatter.finish_batch();
            formatter.print_report(&report, start_time.elapsed());
            info!("Batch download completed: {} saved", report.completed);
            if !report.failures.is_empty() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            formatter.finish_batch();
            formatter.error(&format!("Batch download stopped: {}", e));
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Initialize logging system
fn init_logging() {
    // Get log level from environment or default to warn
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());

    // Parse log level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}
