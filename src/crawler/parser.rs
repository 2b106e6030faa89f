//! HTML parser for extracting links
//!
//! Parsing goes through html5ever (via `scraper`), which recovers from almost
//! any malformed markup. Links are returned in document order because that
//! order drives the breadth-first expansion of the crawl.

use scraper::{Html, Selector};
use thiserror::Error;
use url::Url;

/// Errors that stop a page from being parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid base URL {url}: {message}")]
    InvalidBase { url: String, message: String },

    #[error("invalid selector {selector}: {message}")]
    Selector { selector: String, message: String },
}

/// Extracts every resolvable `<a href>` link from an HTML page
///
/// Each href is resolved against `base_url`. Hrefs that fail to resolve or that
/// resolve to a non-HTTP(S) scheme (`mailto:`, `javascript:`, `tel:`, ...) are
/// dropped. Nothing else is filtered here; fragments, media files and foreign
/// hosts are the classifier's job.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL the page was fetched from
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Absolute link URLs in document order
/// * `Err(ParseError)` - The base URL or the selector is unusable
///
/// # Example
///
/// ```
/// use page_trawler::crawler::extract_links;
///
/// let html = r#"<a href="/a">A</a><a href="b">B</a>"#;
/// let links = extract_links(html, "https://example.com/dir/").unwrap();
/// assert_eq!(links, vec!["https://example.com/a", "https://example.com/dir/b"]);
/// ```
pub fn extract_links(html: &str, base_url: &str) -> Result<Vec<String>, ParseError> {
    let base = Url::parse(base_url).map_err(|e| ParseError::InvalidBase {
        url: base_url.to_string(),
        message: e.to_string(),
    })?;

    let selector = Selector::parse("a[href]").map_err(|e| ParseError::Selector {
        selector: "a[href]".to_string(),
        message: e.to_string(),
    })?;

    let document = Html::parse_document(html);

    let links = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, &base))
        .collect();

    Ok(links)
}

/// Resolves a link href to an absolute HTTP(S) URL
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url.to_string()),
        _ => None,
    }
}
