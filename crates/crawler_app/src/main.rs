use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio_util::sync::CancellationToken;

use crawler_core::CrawlOutcome;
use crawler_engine::{start_crawl_cancellable, FetchSettings, ReqwestFetcher};

/// Depth-bounded, deduplicating web crawler.
#[derive(Debug, Parser)]
#[command(name = "crawler_app", version)]
struct Cli {
    /// Root URL to crawl from.
    #[arg(long)]
    url: String,

    /// Maximum link hops from the root (1 fetches only the root).
    #[arg(long, default_value_t = 2)]
    depth: u32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Emit the full outcome as JSON instead of a text summary.
    #[arg(long)]
    json: bool,

    /// Enable debug logging.
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    crawl_logging::initialize(cli.verbose);

    let settings = FetchSettings {
        request_timeout: Duration::from_secs(cli.timeout_secs),
        ..FetchSettings::default()
    };
    let fetcher = Arc::new(ReqwestFetcher::new(settings)?);

    // Ctrl-C cancels the crawl; in-flight tasks drain and the partial
    // outcome is still reported.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::info!("interrupt received, cancelling crawl");
                cancel.cancel();
            }
        });
    }

    let outcome = start_crawl_cancellable(fetcher, &cli.url, cli.depth, cancel).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_summary(&outcome);
    }
    Ok(())
}

fn print_summary(outcome: &CrawlOutcome) {
    for page in &outcome.pages {
        println!("fetched  {} ({} bytes)", page.url, page.body.len());
    }
    for failure in &outcome.failures {
        println!("failed   {} ({})", failure.url, failure.error);
    }
    println!(
        "{} pages fetched, {} failures",
        outcome.pages.len(),
        outcome.failures.len()
    );
}
