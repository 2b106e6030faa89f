//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process:
//! - Taking URLs off the frontier and running the dequeue-time check
//! - Waiting for the per-domain rate limit
//! - Fetching, parsing and classifying discovered links
//! - Recovering from per-page failures
//! - Stopping cleanly on cancellation

use crate::config::{validate, Config};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchError, FetchResult};
use crate::crawler::parser::{extract_links, ParseError};
use crate::crawler::scheduler::Scheduler;
use crate::state::CrawlSession;
use crate::url::{domain_of, parse_seed, UrlClassification};
use crate::TrawlError;
use reqwest::Client;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Why a single page was abandoned
///
/// None of these stop the crawl. The page is logged and forgotten.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageFailure {
    #[error("network error: {0}")]
    Network(#[from] FetchError),

    #[error("empty response body")]
    EmptyResponse,

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Outcome of taking one URL off the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// Fetched and parsed; `count` is the running visited counter
    Visited { count: u64, enqueued: usize },

    /// Rejected by the dequeue-time check without a fetch
    Skipped(UrlClassification),

    /// Fetched (or attempted) and abandoned
    Failed(PageFailure),

    /// The crawl was cancelled before the fetch was dispatched; a dequeued URL
    /// goes back to the head of the frontier
    Cancelled,
}

/// Final result of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The seed URL, as serialized
    pub seed: String,

    /// The crawl domain derived from the seed
    pub domain: String,

    /// Visited URLs, each exactly once
    pub visited: Vec<String>,

    /// Number of successful visits
    pub visited_count: u64,

    /// Number of abandoned fetch attempts
    pub failed_count: u64,

    /// Number of frontier entries dropped at dequeue time
    pub skipped_count: u64,

    /// Wall-clock duration of the crawl loop
    pub elapsed: Duration,

    /// Whether the run stopped because of a cancellation signal
    pub cancelled: bool,
}

impl CrawlReport {
    /// Returns true if no page was visited
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}

/// Main crawler coordinator structure
///
/// Owns the crawl session outright; there is exactly one fetch in flight at a
/// time and every visited-set mutation happens on this task.
pub struct Coordinator {
    session: CrawlSession,
    scheduler: Scheduler,
    client: Client,
    cancel: CancellationToken,
}

impl Coordinator {
    /// Creates a new coordinator for one crawl run
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `seed` - The seed URL; its host becomes the crawl domain
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(TrawlError)` - The configuration or the seed is invalid, or the
    ///   HTTP client failed to build
    pub fn new(config: &Config, seed: &str) -> Result<Self, TrawlError> {
        validate(config)?;
        let seed = parse_seed(seed)?;
        let session = CrawlSession::new(&seed)?;
        let client = build_http_client(&config.crawler)?;
        let scheduler = Scheduler::new(config.crawler.clone());

        Ok(Self {
            session,
            scheduler,
            client,
            cancel: CancellationToken::new(),
        })
    }

    /// Replaces the cancellation token
    ///
    /// Cancelling the token stops admission of new fetches; the fetch in
    /// flight finishes and the run returns what was visited so far.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns a handle that cancels this crawl
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Returns the crawl session
    pub fn session(&self) -> &CrawlSession {
        &self.session
    }

    /// Runs the crawl loop until the frontier is empty or the crawl is cancelled
    pub async fn run(mut self) -> CrawlReport {
        tracing::info!("Starting crawl on: {}", self.session.seed());

        let start_time = Instant::now();
        let mut cancelled = false;

        while let Some(outcome) = self.step().await {
            if outcome == PageOutcome::Cancelled {
                cancelled = true;
                break;
            }
        }

        if cancelled {
            tracing::warn!(
                "Crawl cancelled with {} URLs left in frontier",
                self.session.frontier_size()
            );
        }

        tracing::info!(
            "Crawling complete. Total pages found: {} ({} failed, {} skipped) in {:?}",
            self.session.visited_count(),
            self.session.failed_count(),
            self.session.skipped_count(),
            start_time.elapsed()
        );

        let seed = self.session.seed().to_string();
        let domain = self.session.domain().to_string();
        let visited_count = self.session.visited_count();
        let failed_count = self.session.failed_count();
        let skipped_count = self.session.skipped_count();

        CrawlReport {
            seed,
            domain,
            visited: self.session.into_visited().into_vec(),
            visited_count,
            failed_count,
            skipped_count,
            elapsed: start_time.elapsed(),
            cancelled,
        }
    }

    /// Processes the frontier head
    ///
    /// Returns `None` when the frontier is empty.
    pub async fn step(&mut self) -> Option<PageOutcome> {
        if self.cancel.is_cancelled() {
            return Some(PageOutcome::Cancelled);
        }

        let (url, classification) = self.session.dequeue()?;

        if !classification.is_admitted() {
            tracing::debug!("Skipping {}: {}", url, classification.reason());
            return Some(PageOutcome::Skipped(classification));
        }

        let domain = domain_of(&url).unwrap_or_else(|| self.session.domain().to_string());
        if !self.scheduler.acquire(&domain, &self.cancel).await {
            self.session.abandon(&url);
            return Some(PageOutcome::Cancelled);
        }

        let outcome = match self.process_url(&url).await {
            Ok((count, enqueued)) => PageOutcome::Visited { count, enqueued },
            Err(failure) => {
                tracing::warn!("Failed to crawl {}: {}", url, failure);
                self.session.mark_failed(&url);
                PageOutcome::Failed(failure)
            }
        };

        Some(outcome)
    }

    /// Fetches and parses one admitted URL
    ///
    /// On success the URL joins the visited set and every admitted link is
    /// appended to the frontier. On failure nothing is recorded.
    async fn process_url(&mut self, url: &str) -> Result<(u64, usize), PageFailure> {
        tracing::debug!("Fetching {}", url);

        let body = match fetch_url(&self.client, url).await {
            FetchResult::Success { body } => body,
            FetchResult::EmptyBody => return Err(PageFailure::EmptyResponse),
            FetchResult::NetworkError(e) => return Err(PageFailure::Network(e)),
        };

        let links = extract_links(&body, url)?;

        let Some(count) = self.session.mark_visited(url) else {
            tracing::debug!("{} was visited while in flight", url);
            return Ok((self.session.visited_count(), 0));
        };
        tracing::info!("Crawled: {} (Total: {})", url, count);

        let mut enqueued = 0;
        for link in &links {
            let classification = self.session.enqueue_discovered(link);
            if classification.is_admitted() {
                enqueued += 1;
            } else {
                tracing::trace!("Not enqueueing {}: {}", link, classification.reason());
            }
        }

        tracing::debug!(
            "{} links on {}, {} enqueued, frontier size {}",
            links.len(),
            url,
            enqueued,
            self.session.frontier_size()
        );

        Ok((count, enqueued))
    }
}

/// Runs a complete crawl from `seed`
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The seed URL
/// * `cancel` - Token that stops the crawl early when cancelled
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl finished or was cancelled
/// * `Err(TrawlError)` - The crawl could not start
///
/// # Example
///
/// ```no_run
/// use page_trawler::config::Config;
/// use page_trawler::crawler::run_crawl;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(&Config::default(), "https://example.com/", CancellationToken::new()).await?;
/// println!("visited {} pages", report.visited_count);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: &Config,
    seed: &str,
    cancel: CancellationToken,
) -> Result<CrawlReport, TrawlError> {
    let coordinator = Coordinator::new(config, seed)?.with_cancellation(cancel);
    Ok(coordinator.run().await)
}
