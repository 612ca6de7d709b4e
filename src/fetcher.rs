use std::future::Future;
use std::time::{Duration, Instant};

use crate::config::CrawlerConfig;
use crate::error::FetchError;
use crate::utils::pick_user_agent;

/// A response received for one URL, whatever its status code.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status_code: u16,
    /// Body decoded as UTF-8, invalid sequences replaced.
    pub body: String,
    /// Length of the raw body in bytes, before any decoding.
    pub content_length: usize,
    pub elapsed: Duration,
}

/// The HTTP capability the crawler consumes.
///
/// Any received response is `Ok`, including 4xx and 5xx statuses. `Err` is
/// reserved for failures where no usable response arrived.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// [`Fetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: &CrawlerConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            user_agent: pick_user_agent(config.user_agent.as_deref()),
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let started = Instant::now();

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header(
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(FetchedPage {
            status_code,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            content_length: bytes.len(),
            elapsed: started.elapsed(),
        })
    }
}
