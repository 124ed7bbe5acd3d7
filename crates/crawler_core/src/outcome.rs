use serde::Serialize;

use crate::error::FetchError;

/// One successfully fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawledPage {
    pub url: String,
    pub body: String,
}

/// One fetch that failed; the crawl carried on without it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlFailure {
    pub url: String,
    pub error: FetchError,
}

/// Aggregated result of a whole crawl, assembled after the completion barrier
/// releases the caller.
///
/// Both lists are sorted by URL; a URL never appears in both, since each URL
/// is fetched at most once and resolves to exactly one of the two.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CrawlOutcome {
    pub pages: Vec<CrawledPage>,
    pub failures: Vec<CrawlFailure>,
}

impl CrawlOutcome {
    /// Looks up a fetched page by URL.
    pub fn page(&self, url: &str) -> Option<&CrawledPage> {
        self.pages.iter().find(|p| p.url == url)
    }

    /// Looks up a recorded failure by URL.
    pub fn failure(&self, url: &str) -> Option<&CrawlFailure> {
        self.failures.iter().find(|f| f.url == url)
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{CrawlFailure, CrawlOutcome, CrawledPage};
    use crate::error::{FetchError, FetchErrorKind};

    fn outcome() -> CrawlOutcome {
        CrawlOutcome {
            pages: vec![CrawledPage {
                url: "https://a.test/".to_string(),
                body: "root".to_string(),
            }],
            failures: vec![CrawlFailure {
                url: "https://a.test/missing".to_string(),
                error: FetchError::new(FetchErrorKind::NotFound, "not found"),
            }],
        }
    }

    #[test]
    fn page_and_failure_lookups() {
        let outcome = outcome();
        assert_eq!(outcome.page("https://a.test/").unwrap().body, "root");
        assert!(outcome.page("https://a.test/missing").is_none());
        assert_eq!(
            outcome.failure("https://a.test/missing").unwrap().error.kind,
            FetchErrorKind::NotFound
        );
    }

    #[test]
    fn empty_outcome() {
        assert!(CrawlOutcome::default().is_empty());
        assert!(!outcome().is_empty());
    }
}
