use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("markup pattern is valid"));

// A word is a run of letters that may contain, but not start with, ' or -.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}[\p{L}'-]*").expect("word pattern is valid"));

/// Metadata pulled out of one HTML document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageData {
    pub title: String,
    /// `false` when the document has no `<title>` element at all.
    pub title_found: bool,
    pub word_count: usize,
    pub images: Vec<String>,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
}

/// Extracts title, word count, images and classified links from `html`.
///
/// A link is internal when its `href` literally starts with `base_url`. This
/// is a plain string prefix test: no URL resolution, no host comparison. Every
/// collection is deduplicated by exact string, keeping first-seen order.
///
/// Extraction never fails. A page without a `<title>` gets an empty title and
/// `title_found == false`; the caller decides how to report it.
pub fn extract_page_data(html: &str, base_url: &str) -> PageData {
    let document = Html::parse_document(html);

    let title = first_text(&document, "title");

    let mut internal_links = Vec::new();
    let mut external_links = Vec::new();
    let mut seen_internal = HashSet::new();
    let mut seen_external = HashSet::new();

    for href in attribute_values(&document, "a[href]", "href") {
        if is_internal(&href, base_url) {
            if seen_internal.insert(href.clone()) {
                internal_links.push(href);
            }
        } else if seen_external.insert(href.clone()) {
            external_links.push(href);
        }
    }

    let mut images = Vec::new();
    let mut seen_images = HashSet::new();
    for src in attribute_values(&document, "img", "src") {
        if seen_images.insert(src.clone()) {
            images.push(src);
        }
    }

    PageData {
        title_found: title.is_some(),
        title: title.unwrap_or_default(),
        word_count: count_words(html),
        images,
        internal_links,
        external_links,
    }
}

/// Literal prefix test used to split internal from external links.
///
/// An empty base never matches, mirroring how an empty `[href^=""]` attribute
/// selector matches nothing.
pub fn is_internal(href: &str, base_url: &str) -> bool {
    !base_url.is_empty() && href.starts_with(base_url)
}

/// Counts words in `html` once comments and tags are stripped.
///
/// Tags are removed without inserting whitespace, so `Page</a>2` stays glued
/// together. Digits and punctuation never form a word on their own.
pub fn count_words(html: &str) -> usize {
    let text = MARKUP.replace_all(html, "");
    WORD.find_iter(&text).count()
}

fn first_text(document: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).ok()?;
    let element = document.select(&selector).next()?;
    let text: String = element.text().collect();
    Some(text.split_whitespace().collect::<Vec<_>>().join(" "))
}

// Elements lacking the attribute contribute an empty string.
fn attribute_values(document: &Html, css: &str, attribute: &str) -> Vec<String> {
    match Selector::parse(css) {
        Ok(selector) => document
            .select(&selector)
            .map(|element| element.value().attr(attribute).unwrap_or("").to_string())
            .collect(),
        Err(_) => Vec::new(),
    }
}
