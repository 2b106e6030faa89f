//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeout
//! - A single GET per URL, never retried
//! - Classifying the outcome as success, empty body or network error

use crate::config::CrawlerConfig;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Why a fetch failed
///
/// Every variant is a per-URL failure: the crawl logs it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("non-HTML content: {0}")]
    NotHtml(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_connect() {
            FetchError::Connect(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else if e.is_body() || e.is_decode() {
            FetchError::Body(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// 2xx response with a non-blank body
    Success {
        /// Page body content
        body: String,
    },

    /// 2xx response whose body is empty or whitespace only
    EmptyBody,

    /// DNS, connection, timeout, status or content-type failure
    NetworkError(FetchError),
}

/// Builds an HTTP client with proper configuration
///
/// The request timeout covers the whole exchange, connect through body.
///
/// # Example
///
/// ```no_run
/// use page_trawler::config::CrawlerConfig;
/// use page_trawler::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.request_timeout_secs);

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL once and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx, HTML or untyped, non-blank body | `Success` |
/// | 2xx, blank body | `EmptyBody` |
/// | 2xx, non-HTML Content-Type | `NetworkError(NotHtml)` |
/// | Non-2xx status | `NetworkError(Status)` |
/// | Timeout | `NetworkError(Timeout)` |
/// | DNS / connection refused / TLS | `NetworkError(Connect)` |
///
/// Never returns an `Err` and never panics; the caller decides what to log.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return FetchResult::NetworkError(e.into()),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::NetworkError(FetchError::Status(status.as_u16()));
    }

    if let Some(content_type) = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    {
        if !is_html_content_type(content_type) {
            return FetchResult::NetworkError(FetchError::NotHtml(content_type.to_string()));
        }
    }

    match response.text().await {
        Ok(body) if body.trim().is_empty() => FetchResult::EmptyBody,
        Ok(body) => FetchResult::Success { body },
        Err(e) => FetchResult::NetworkError(FetchError::Body(e.to_string())),
    }
}

/// Returns true for HTML and XHTML media types
fn is_html_content_type(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    mime == "text/html" || mime == "application/xhtml+xml"
}
