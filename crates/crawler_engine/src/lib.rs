//! Crawler engine: fetch capability, fan-out scheduling and completion tracking.
mod barrier;
mod fetch;
mod links;
mod scheduler;

pub use barrier::TaskBarrier;
pub use fetch::{FetchSettings, FetchedPage, Fetcher, ReqwestFetcher, StaticFetcher};
pub use links::extract_links;
pub use scheduler::{start_crawl, start_crawl_cancellable};
