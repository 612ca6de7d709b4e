// Site Crawler Library
//
// Depth-bounded, sequential site crawler. Starting from a seed URL it records
// per-page metadata (title, word count, images, internal and external links)
// and follows internal links, skipping URLs it has already tried.

pub mod api;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod record;
pub mod session;
pub mod traversal;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use config::{AppConfig, CrawlerConfig, ServerConfig};
pub use error::{CrawlError, FetchError};
pub use extractor::{extract_page_data, PageData};
pub use fetcher::{FetchedPage, Fetcher, HttpFetcher};
pub use record::PageRecord;
pub use session::{CrawlReport, CrawlRequest, CrawlStatus, Crawler};
pub use traversal::{FetchFailure, VisitedSet};
