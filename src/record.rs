use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::extractor::PageData;
use crate::fetcher::FetchedPage;
use crate::utils::round_to;

/// Metadata captured for one fetched page.
///
/// The `*Count` fields of the JSON form are derived from the collections when
/// serializing, so they cannot drift from the sets they describe.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRecord {
    /// Exactly the URL that was requested.
    pub url: String,
    pub status_code: u16,
    pub load_time_seconds: f64,
    /// Response body length in bytes.
    pub content_length: usize,
    pub word_count: usize,
    /// Title length in characters.
    pub title_length: usize,
    pub images: Vec<String>,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
}

impl PageRecord {
    pub fn new(url: &str, page: &FetchedPage, data: PageData) -> Self {
        Self {
            url: url.to_string(),
            status_code: page.status_code,
            load_time_seconds: round_to(page.elapsed.as_secs_f64(), 4),
            content_length: page.content_length,
            word_count: data.word_count,
            title_length: data.title.chars().count(),
            images: data.images,
            internal_links: data.internal_links,
            external_links: data.external_links,
        }
    }

    pub fn images_count(&self) -> usize {
        self.images.len()
    }

    pub fn internal_links_count(&self) -> usize {
        self.internal_links.len()
    }

    pub fn external_links_count(&self) -> usize {
        self.external_links.len()
    }
}

impl Serialize for PageRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PageRecord", 12)?;
        state.serialize_field("url", &self.url)?;
        state.serialize_field("statusCode", &self.status_code)?;
        state.serialize_field("loadTimeSeconds", &self.load_time_seconds)?;
        state.serialize_field("contentLength", &self.content_length)?;
        state.serialize_field("wordCount", &self.word_count)?;
        state.serialize_field("titleLength", &self.title_length)?;
        state.serialize_field("imagesCount", &self.images_count())?;
        state.serialize_field("internalLinksCount", &self.internal_links_count())?;
        state.serialize_field("externalLinksCount", &self.external_links_count())?;
        state.serialize_field("images", &self.images)?;
        state.serialize_field("internalLinks", &self.internal_links)?;
        state.serialize_field("externalLinks", &self.external_links)?;
        state.end()
    }
}
