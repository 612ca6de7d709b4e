//! In-memory [`Fetcher`] that serves canned pages and records every call.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::FetchError;
use crate::fetcher::{FetchedPage, Fetcher};

#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    responses: HashMap<String, Result<(u16, String), String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(self, url: &str, body: &str) -> Self {
        self.status(url, 200, body)
    }

    pub(crate) fn status(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses.insert(url.to_string(), Ok((status, body.to_string())));
        self
    }

    pub(crate) fn failing(mut self, url: &str) -> Self {
        self.responses.insert(url.to_string(), Err("connection reset".to_string()));
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());

        match self.responses.get(url) {
            Some(Ok((status_code, body))) => Ok(FetchedPage {
                status_code: *status_code,
                body: body.clone(),
                content_length: body.len(),
                elapsed: Duration::from_millis(5),
            }),
            Some(Err(reason)) => Err(FetchError::Body(reason.clone())),
            None => Err(FetchError::Body(format!("no route to {}", url))),
        }
    }
}

/// Builds a page whose body links to each of `links`.
pub(crate) fn linking_page(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<a href="{}">link</a>"#, link))
        .collect();
    format!("<html><title>{}</title><body>{}</body></html>", title, anchors)
}
