use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use tokio_util::sync::CancellationToken;

use crawler_core::{
    normalize_url_for_dedupe, CrawlFailure, CrawlOutcome, PageSlot, VisitedCache,
};

use crate::barrier::TaskBarrier;
use crate::fetch::Fetcher;

/// Shared state of one crawl, passed explicitly to every task.
struct CrawlContext {
    fetcher: Arc<dyn Fetcher>,
    cache: VisitedCache,
    barrier: TaskBarrier,
    failures: Mutex<Vec<CrawlFailure>>,
    cancel: CancellationToken,
}

impl CrawlContext {
    fn record_failure(&self, failure: CrawlFailure) {
        self.failures
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(failure);
    }
}

/// Crawls from `root_url` down to `max_depth` link hops and returns once all
/// spawned work has finished.
///
/// Fetch failures are collected into the outcome, never propagated; a crawl
/// with zero successful fetches still returns cleanly.
pub async fn start_crawl(
    fetcher: Arc<dyn Fetcher>,
    root_url: &str,
    max_depth: u32,
) -> CrawlOutcome {
    start_crawl_cancellable(fetcher, root_url, max_depth, CancellationToken::new()).await
}

/// Like [`start_crawl`], but checks `cancel` at every task entry. Cancelled
/// tasks stop before fetching; the crawl still joins all in-flight work
/// before returning whatever was gathered so far.
pub async fn start_crawl_cancellable(
    fetcher: Arc<dyn Fetcher>,
    root_url: &str,
    max_depth: u32,
    cancel: CancellationToken,
) -> CrawlOutcome {
    let ctx = Arc::new(CrawlContext {
        fetcher,
        cache: VisitedCache::new(),
        barrier: TaskBarrier::new(),
        failures: Mutex::new(Vec::new()),
        cancel,
    });

    // The root task is registered before it is spawned, so the barrier can
    // never observe zero while work is pending.
    ctx.barrier.register();
    tokio::spawn(crawl_page(ctx.clone(), root_url.to_string(), max_depth));
    ctx.barrier.wait().await;

    let pages = ctx.cache.pages();
    let mut failures = std::mem::take(&mut *ctx.failures.lock().unwrap_or_else(|e| e.into_inner()));
    failures.sort_by(|a, b| a.url.cmp(&b.url));
    CrawlOutcome { pages, failures }
}

/// One crawl task: claim the URL, fetch it, fan out over its links.
///
/// Every exit path signals `done` to the barrier, and children are registered
/// before the parent signals, so the outstanding count cannot dip to zero
/// while spawns are still pending. Boxed because the future recurses through
/// `tokio::spawn`.
fn crawl_page(ctx: Arc<CrawlContext>, url: String, depth: u32) -> BoxFuture<'static, ()> {
    async move {
        if ctx.cancel.is_cancelled() || depth == 0 {
            ctx.barrier.done();
            return;
        }

        // Atomic claim: losing it means the URL is already fetched, failed,
        // or in flight in another task. Either way, nothing left to do here.
        let key = normalize_url_for_dedupe(&url);
        if !ctx.cache.insert_if_absent(&key, PageSlot::InFlight) {
            log::debug!("already visited or in flight: {key}");
            ctx.barrier.done();
            return;
        }

        // The fetch runs outside the cache lock; a slow page stalls nothing
        // but its own subtree.
        match ctx.fetcher.fetch(&url).await {
            Ok(page) => {
                log::info!("fetched {key} ({} links)", page.links.len());
                ctx.cache.fulfill(&key, page.body);
                for link in page.links {
                    ctx.barrier.register();
                    tokio::spawn(crawl_page(ctx.clone(), link, depth - 1));
                }
            }
            Err(error) => {
                log::warn!("fetch failed for {key}: {error}");
                ctx.cache.mark_failed(&key);
                ctx.record_failure(CrawlFailure { url: key, error });
            }
        }

        ctx.barrier.done();
    }
    .boxed()
}
