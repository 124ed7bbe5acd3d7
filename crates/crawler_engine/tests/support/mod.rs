use std::collections::HashMap;
use std::sync::{Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use crawler_core::FetchError;
use crawler_engine::{FetchedPage, Fetcher, StaticFetcher};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(crawl_logging::initialize_for_tests);
}

/// Wraps a canned fetcher and counts calls per URL, with an optional delay to
/// keep many fetches genuinely in flight at once.
pub struct CountingFetcher {
    inner: StaticFetcher,
    delay: Option<Duration>,
    calls: Mutex<HashMap<String, usize>>,
}

impl CountingFetcher {
    pub fn new(inner: StaticFetcher) -> Self {
        Self {
            inner,
            delay: None,
            calls: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_delay(inner: StaticFetcher, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(inner)
        }
    }

    pub fn calls_for(&self, url: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(url)
            .copied()
            .unwrap_or_default()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl Fetcher for CountingFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default() += 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.fetch(url).await
    }
}
