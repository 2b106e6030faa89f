use crate::config::CrawlerConfig;
use std::time::{Duration, Instant};

/// Tracks the dispatch timing of a domain during crawling
///
/// This structure holds the per-domain information the scheduler needs to keep
/// successive fetches at least `minimum_delay_ms` apart.
#[derive(Debug, Clone, Default)]
pub struct DomainState {
    /// Number of fetches dispatched to this domain in the current crawl
    pub request_count: u32,

    /// Timestamp of the last dispatch to this domain
    pub last_request_time: Option<Instant>,
}

impl DomainState {
    /// Creates a new DomainState with no dispatches recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that a fetch was dispatched to this domain
    pub fn record_request(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(now);
    }

    /// Calculates the time until the next fetch may be dispatched
    ///
    /// Returns None if a fetch can be dispatched now.
    pub fn time_until_next_request(
        &self,
        config: &CrawlerConfig,
        now: Instant,
    ) -> Option<Duration> {
        let last = self.last_request_time?;
        let min_delay = Duration::from_millis(config.minimum_delay_ms);
        let elapsed = now.saturating_duration_since(last);
        if elapsed < min_delay {
            Some(min_delay - elapsed)
        } else {
            None
        }
    }
}
