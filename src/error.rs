use thiserror::Error;

/// Reasons a single page could not be fetched.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Errors surfaced by a crawl as a whole.
///
/// Individual page failures never end up here; they are recorded on the
/// report and the crawl moves on.
#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Seed URL {url} could not be fetched: {reason}")]
    SeedUnreachable { url: String, reason: String },
}
