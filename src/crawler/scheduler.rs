//! Scheduler for per-domain rate limiting
//!
//! This module handles:
//! - Per-domain dispatch timestamps
//! - Waiting until a domain may receive its next request
//! - Aborting that wait when the crawl is cancelled

use crate::config::CrawlerConfig;
use crate::state::DomainState;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Scheduler enforces the minimum delay between requests to the same domain
///
/// The wait is an async sleep, so it suspends only the task that is about to
/// fetch and can be interrupted by the cancellation token.
pub struct Scheduler {
    /// Per-domain state tracking
    domain_states: HashMap<String, DomainState>,

    /// Crawler configuration
    config: CrawlerConfig,
}

impl Scheduler {
    /// Creates a new scheduler with no domain history
    pub fn new(config: CrawlerConfig) -> Self {
        Self {
            domain_states: HashMap::new(),
            config,
        }
    }

    /// Returns how long `domain` must wait before its next dispatch
    pub fn time_until_ready(&self, domain: &str, now: Instant) -> Option<Duration> {
        self.domain_states
            .get(domain)
            .and_then(|state| state.time_until_next_request(&self.config, now))
    }

    /// Waits until `domain` may receive a request, then records the dispatch
    ///
    /// # Returns
    ///
    /// * `true` - The slot was taken; the caller may fetch now
    /// * `false` - The crawl was cancelled while waiting; nothing was recorded
    pub async fn acquire(&mut self, domain: &str, cancel: &CancellationToken) -> bool {
        if cancel.is_cancelled() {
            return false;
        }

        if let Some(wait) = self.time_until_ready(domain, Instant::now()) {
            tracing::trace!("Rate limiting {}: waiting {:?}", domain, wait);
            tokio::select! {
                _ = cancel.cancelled() => return false,
                _ = tokio::time::sleep(wait) => {}
            }
        }

        self.record_request(domain);
        true
    }

    /// Records that a request was made to a domain
    pub fn record_request(&mut self, domain: &str) {
        let now = Instant::now();
        let state = self
            .domain_states
            .entry(domain.to_string())
            .or_insert_with(DomainState::new);
        state.record_request(now);
        tracing::trace!("Dispatch #{} to {}", state.request_count, domain);
    }
}
