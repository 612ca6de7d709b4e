use serde::Serialize;
use std::collections::HashSet;
use tokio_util::sync::CancellationToken;

use crate::config::CrawlerConfig;
use crate::extractor::extract_page_data;
use crate::fetcher::Fetcher;
use crate::record::PageRecord;

/// URLs already attempted in one crawl session, compared as exact strings.
#[derive(Debug, Default, Clone)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    /// Returns `false` when the URL was already present.
    pub fn insert(&mut self, url: &str) -> bool {
        self.urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// A URL whose fetch produced no response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FetchFailure {
    pub url: String,
    pub depth: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Nothing left on the frontier.
    Exhausted,
    PageLimit,
    Cancelled,
}

#[derive(Debug)]
struct FrontierItem {
    url: String,
    depth: usize,
}

/// State of one crawl: the visited set, the frontier and everything recorded.
///
/// The frontier is a stack. Links found on a page are pushed in reverse, so
/// they pop in document order and each link's subtree is finished before its
/// next sibling starts. Results therefore come out in pre-order, depth-first.
pub struct Traversal {
    base_url: String,
    single_page: bool,
    max_depth: usize,
    max_pages: Option<usize>,
    visited: VisitedSet,
    frontier: Vec<FrontierItem>,
    pages: Vec<PageRecord>,
    failures: Vec<FetchFailure>,
}

impl Traversal {
    pub fn new(base_url: &str, single_page: bool, config: &CrawlerConfig) -> Self {
        Self {
            base_url: base_url.to_string(),
            single_page,
            max_depth: config.max_depth,
            max_pages: config.max_pages,
            visited: VisitedSet::default(),
            frontier: vec![FrontierItem {
                url: base_url.to_string(),
                depth: 0,
            }],
            pages: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Drains the frontier, one fetch at a time.
    pub async fn run<F: Fetcher>(&mut self, fetcher: &F, cancel: &CancellationToken) -> StopReason {
        while let Some(item) = self.frontier.pop() {
            if !self.should_visit(&item.url, item.depth) {
                continue;
            }
            if cancel.is_cancelled() {
                log::info!("Crawl of {} cancelled before {}", self.base_url, item.url);
                return StopReason::Cancelled;
            }
            if self.max_pages.is_some_and(|limit| self.pages.len() >= limit) {
                log::info!(
                    "Page limit reached for {}, {} URLs left unvisited",
                    self.base_url,
                    self.frontier.len() + 1
                );
                return StopReason::PageLimit;
            }

            self.crawl_page(fetcher, &item.url, item.depth).await;
        }

        StopReason::Exhausted
    }

    fn should_visit(&self, url: &str, depth: usize) -> bool {
        if depth > self.max_depth {
            log::debug!("Skipping {} at depth {} (max {})", url, depth, self.max_depth);
            return false;
        }
        if self.visited.contains(url) {
            log::debug!("Skipping already visited {}", url);
            return false;
        }
        true
    }

    /// Fetches `url`, records it and schedules its internal links.
    ///
    /// The URL is marked visited before the fetch, so a failing URL is never
    /// tried again in this session.
    async fn crawl_page<F: Fetcher>(&mut self, fetcher: &F, url: &str, depth: usize) {
        self.visited.insert(url);
        log::info!("Crawling [depth {}]: {}", depth, url);

        let page = match fetcher.fetch(url).await {
            Ok(page) => page,
            Err(e) => {
                log::error!("Error crawling {}: {}", url, e);
                self.failures.push(FetchFailure {
                    url: url.to_string(),
                    depth,
                    reason: e.to_string(),
                });
                return;
            }
        };

        let data = extract_page_data(&page.body, &self.base_url);
        if !data.title_found {
            log::warn!("No <title> found at {}", url);
        }

        if !self.single_page {
            for link in data.internal_links.iter().rev() {
                if !self.visited.contains(link) {
                    self.frontier.push(FrontierItem {
                        url: link.clone(),
                        depth: depth + 1,
                    });
                }
            }
        }

        self.pages.push(PageRecord::new(url, &page, data));
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn into_results(self) -> (Vec<PageRecord>, Vec<FetchFailure>) {
        (self.pages, self.failures)
    }
}
