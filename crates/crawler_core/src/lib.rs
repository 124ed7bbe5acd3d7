//! Crawler core: shared-state primitives and result types, no IO.
mod cache;
mod error;
mod normalize;
mod outcome;

pub use cache::{PageSlot, VisitedCache};
pub use error::{FetchError, FetchErrorKind};
pub use normalize::normalize_url_for_dedupe;
pub use outcome::{CrawlFailure, CrawlOutcome, CrawledPage};
