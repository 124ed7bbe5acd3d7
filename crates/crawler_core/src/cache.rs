use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::outcome::CrawledPage;

/// State of one URL in the visited cache.
///
/// A slot starts `InFlight` when a crawl task wins the claim for its URL and
/// resolves exactly once, to `Fetched` or `Failed`. Resolved slots are never
/// overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSlot {
    InFlight,
    Fetched(String),
    Failed,
}

/// Map of URL to page slot, safe for concurrent use.
///
/// `insert_if_absent` is the single atomic check-then-insert primitive; all
/// other mutation goes through `fulfill`/`mark_failed`, which only the claim
/// winner calls. Callers never hold the lock across a fetch.
#[derive(Debug, Clone, Default)]
pub struct VisitedCache {
    inner: Arc<Mutex<HashMap<String, PageSlot>>>,
}

impl VisitedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically inserts `slot` for `url` if no slot exists yet.
    ///
    /// Returns `true` if this caller inserted; `false` leaves the existing
    /// slot untouched, whatever its state.
    pub fn insert_if_absent(&self, url: &str, slot: PageSlot) -> bool {
        let mut map = self.lock();
        if map.contains_key(url) {
            return false;
        }
        map.insert(url.to_string(), slot);
        true
    }

    /// Snapshot read of the slot for `url`.
    pub fn get(&self, url: &str) -> Option<PageSlot> {
        self.lock().get(url).cloned()
    }

    /// Resolves the caller's in-flight claim with the fetched body.
    pub fn fulfill(&self, url: &str, body: String) {
        self.lock().insert(url.to_string(), PageSlot::Fetched(body));
    }

    /// Resolves the caller's in-flight claim as failed. The slot stays in the
    /// map so the URL is never refetched.
    pub fn mark_failed(&self, url: &str) {
        self.lock().insert(url.to_string(), PageSlot::Failed);
    }

    /// All successfully fetched pages, sorted by URL.
    pub fn pages(&self) -> Vec<CrawledPage> {
        let map = self.lock();
        let mut pages: Vec<CrawledPage> = map
            .iter()
            .filter_map(|(url, slot)| match slot {
                PageSlot::Fetched(body) => Some(CrawledPage {
                    url: url.clone(),
                    body: body.clone(),
                }),
                PageSlot::InFlight | PageSlot::Failed => None,
            })
            .collect();
        pages.sort_by(|a, b| a.url.cmp(&b.url));
        pages
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, PageSlot>> {
        // A poisoned lock means a panic while holding it; the map itself is
        // still structurally sound, so keep going.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
