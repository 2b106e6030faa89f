//! Crawl session: the frontier, the visited set and the run counters
//!
//! One `CrawlSession` lives for exactly one crawl run. It is owned by the
//! coordinator and every mutation goes through `&mut self`, so the
//! "check visited, then mark visited" sequence cannot interleave with another
//! fetch.

use crate::state::PageState;
use crate::url::{classify_dequeued, classify_url, extract_domain, UrlClassification};
use crate::{UrlError, UrlResult};
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Set of successfully visited URLs
///
/// Membership is by exact string equality. Iteration yields URLs in the order
/// they were first inserted; callers should not rely on any particular order.
#[derive(Debug, Clone, Default)]
pub struct VisitedSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a URL, returning false if it was already present
    pub fn insert(&mut self, url: &str) -> bool {
        if !self.members.insert(url.to_string()) {
            return false;
        }
        self.order.push(url.to_string());
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.members.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Consumes the set, yielding the URLs in insertion order
    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// FIFO queue of URLs awaiting a visit attempt
///
/// The frontier does not deduplicate. The same URL may sit in it several times;
/// the duplicates are dropped when dequeued after the first one was visited.
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, url: String) {
        self.queue.push_back(url);
    }

    /// Puts a URL back at the head, ahead of everything already queued
    pub fn push_front(&mut self, url: String) {
        self.queue.push_front(url);
    }

    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.queue.iter().any(|queued| queued == url)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// State of a single crawl run
#[derive(Debug)]
pub struct CrawlSession {
    seed: String,
    domain: String,
    frontier: Frontier,
    visited: VisitedSet,
    in_flight: Option<String>,
    visited_count: u64,
    failed_count: u64,
    skipped_count: u64,
}

impl CrawlSession {
    /// Creates a session seeded with `seed`
    ///
    /// The crawl domain is taken from the seed and fixed for the whole run.
    pub fn new(seed: &Url) -> UrlResult<Self> {
        let domain =
            extract_domain(seed).ok_or_else(|| UrlError::MissingHost(seed.to_string()))?;

        let mut frontier = Frontier::new();
        frontier.push(seed.to_string());

        Ok(Self {
            seed: seed.to_string(),
            domain,
            frontier,
            visited: VisitedSet::new(),
            in_flight: None,
            visited_count: 0,
            failed_count: 0,
            skipped_count: 0,
        })
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    pub fn visited_count(&self) -> u64 {
        self.visited_count
    }

    pub fn failed_count(&self) -> u64 {
        self.failed_count
    }

    pub fn skipped_count(&self) -> u64 {
        self.skipped_count
    }

    /// Pops the frontier head and runs the dequeue-time check on it
    ///
    /// Returns `None` when the frontier is empty. Otherwise returns the URL and
    /// its classification; on `Admit` the URL becomes the in-flight page, on
    /// any other classification it is counted as skipped.
    pub fn dequeue(&mut self) -> Option<(String, UrlClassification)> {
        let url = self.frontier.pop()?;
        let classification = classify_dequeued(&url, &self.visited);

        if classification.is_admitted() {
            self.in_flight = Some(url.clone());
        } else {
            self.skipped_count += 1;
        }

        Some((url, classification))
    }

    /// Records a successful visit of the in-flight page
    ///
    /// Returns the running visited counter, or `None` if `url` is not the
    /// in-flight page (already visited, or never dequeued). Nothing is
    /// recorded in that case.
    pub fn mark_visited(&mut self, url: &str) -> Option<u64> {
        if !self.transition(url, PageState::Visited) {
            return None;
        }
        self.in_flight = None;
        self.visited.insert(url);
        self.visited_count += 1;
        Some(self.visited_count)
    }

    /// Records a failed attempt of the in-flight page
    ///
    /// The URL itself is not remembered. Returns false, counting nothing, if
    /// `url` is not in flight.
    pub fn mark_failed(&mut self, url: &str) -> bool {
        if !self.transition(url, PageState::Failed) {
            return false;
        }
        self.in_flight = None;
        self.failed_count += 1;
        true
    }

    /// Returns the in-flight page to the head of the frontier without a fetch
    ///
    /// Used when the crawl is cancelled between dequeue and dispatch.
    pub fn abandon(&mut self, url: &str) -> bool {
        if self.in_flight.as_deref() != Some(url) || !self.transition(url, PageState::Enqueued) {
            return false;
        }
        self.in_flight = None;
        self.frontier.push_front(url.to_string());
        true
    }

    /// Runs the full classifier on a discovered link and enqueues it if admitted
    pub fn enqueue_discovered(&mut self, link: &str) -> UrlClassification {
        let classification = classify_url(link, &self.domain, &self.visited);
        if classification.is_admitted() {
            self.frontier.push(link.to_string());
        }
        classification
    }

    /// Reports where a URL currently is in its lifecycle
    pub fn state_of(&self, url: &str) -> PageState {
        if self.visited.contains(url) {
            PageState::Visited
        } else if self.in_flight.as_deref() == Some(url) {
            PageState::InFlight
        } else if self.frontier.contains(url) {
            PageState::Enqueued
        } else {
            PageState::Unseen
        }
    }

    /// Ends the session, handing the visited set to the caller
    pub fn into_visited(self) -> VisitedSet {
        self.visited
    }

    /// Checks that `url` may move to `next` from where it is now
    fn transition(&self, url: &str, next: PageState) -> bool {
        let current = self.state_of(url);
        if current.can_transition_to(next) {
            return true;
        }
        tracing::debug!("Ignoring {} -> {} for {}", current, next, url);
        false
    }
}
