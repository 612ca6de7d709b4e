use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::config::CrawlerConfig;
use crate::error::CrawlError;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::record::PageRecord;
use crate::traversal::{FetchFailure, StopReason, Traversal};

/// One crawl to run: where to start and whether to follow links.
#[derive(Debug, Clone)]
pub struct CrawlRequest {
    /// Fetched first, and also the literal prefix that marks a link internal.
    pub base_url: String,
    pub single_page: bool,
    pub cancel: CancellationToken,
}

impl CrawlRequest {
    pub fn new(base_url: impl Into<String>, single_page: bool) -> Self {
        Self {
            base_url: base_url.into(),
            single_page,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CrawlStatus {
    Completed,
    PartiallyCompleted,
    /// The seed URL itself could not be fetched.
    Failed,
    PageLimitReached,
    Cancelled,
}

/// Full outcome of a crawl session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlReport {
    pub session_id: String,
    pub start_time: String,
    pub end_time: String,
    pub base_url: String,
    pub single_page: bool,
    pub status: CrawlStatus,
    pub pages: Vec<PageRecord>,
    pub failures: Vec<FetchFailure>,
}

impl CrawlReport {
    /// Pages of the crawl, or an error when the seed was unreachable.
    pub fn into_pages(self) -> Result<Vec<PageRecord>, CrawlError> {
        if self.status == CrawlStatus::Failed {
            let reason = self
                .failures
                .into_iter()
                .next()
                .map(|failure| failure.reason)
                .unwrap_or_default();
            return Err(CrawlError::SeedUnreachable {
                url: self.base_url,
                reason,
            });
        }
        Ok(self.pages)
    }
}

/// Entry point of the crawl engine.
///
/// A `Crawler` holds no per-crawl state: every call builds a fresh
/// [`Traversal`], so one instance can serve any number of crawls.
pub struct Crawler<F = HttpFetcher> {
    fetcher: F,
    config: CrawlerConfig,
}

impl Crawler<HttpFetcher> {
    pub fn from_config(config: CrawlerConfig) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlerConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    /// Crawls from `base_url` and returns every page recorded.
    ///
    /// Never fails: unreachable pages, the seed included, are logged and left
    /// out. Use [`Crawler::run`] to tell an unreachable seed apart.
    pub async fn crawl(&self, base_url: &str, single_page: bool) -> Vec<PageRecord> {
        self.run(CrawlRequest::new(base_url, single_page)).await.pages
    }

    pub async fn run(&self, request: CrawlRequest) -> CrawlReport {
        let session_id = uuid::Uuid::new_v4().to_string();
        let start_time = chrono::Utc::now().to_rfc3339();

        log::info!(
            "Starting crawl {} of {} (single page: {}, max depth: {})",
            session_id,
            request.base_url,
            request.single_page,
            self.config.max_depth
        );

        let mut traversal = Traversal::new(&request.base_url, request.single_page, &self.config);
        let stop = traversal.run(&self.fetcher, &request.cancel).await;
        let (pages, failures) = traversal.into_results();
        let status = determine_status(stop, &pages, &failures);

        log::info!(
            "Crawl {} finished with {:?}: {} pages, {} failures",
            session_id,
            status,
            pages.len(),
            failures.len()
        );

        CrawlReport {
            session_id,
            start_time,
            end_time: chrono::Utc::now().to_rfc3339(),
            base_url: request.base_url,
            single_page: request.single_page,
            status,
            pages,
            failures,
        }
    }
}

fn determine_status(
    stop: StopReason,
    pages: &[PageRecord],
    failures: &[FetchFailure],
) -> CrawlStatus {
    match stop {
        StopReason::Cancelled => CrawlStatus::Cancelled,
        StopReason::PageLimit => CrawlStatus::PageLimitReached,
        StopReason::Exhausted if pages.is_empty() && !failures.is_empty() => CrawlStatus::Failed,
        StopReason::Exhausted if !failures.is_empty() => CrawlStatus::PartiallyCompleted,
        StopReason::Exhausted => CrawlStatus::Completed,
    }
}
