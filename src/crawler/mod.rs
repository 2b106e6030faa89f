//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching, one attempt per URL
//! - HTML parsing and link extraction
//! - Per-domain rate limiting
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator, CrawlReport, PageFailure, PageOutcome};
pub use fetcher::{build_http_client, fetch_url, FetchError, FetchResult};
pub use parser::{extract_links, ParseError};
pub use scheduler::Scheduler;

use crate::config::Config;
use crate::Result;
use tokio_util::sync::CancellationToken;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Validate the seed and derive the crawl domain
/// 2. Build the HTTP client
/// 3. Fetch pages breadth-first, one at a time, rate limited per domain
/// 4. Extract and follow same-domain links
/// 5. Return the visited set with run counters
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The URL to start from
/// * `cancel` - Stops admission of new fetches when cancelled
pub async fn crawl(
    config: &Config,
    seed: &str,
    cancel: CancellationToken,
) -> Result<CrawlReport> {
    run_crawl(config, seed, cancel).await
}
