//! State module for tracking crawl progress
//!
//! This module provides the in-memory state of one crawl run.
//!
//! # Components
//!
//! - `PageState`: Where a URL is in its lifecycle (unseen, enqueued, in flight, visited, failed)
//! - `DomainState`: Per-domain dispatch timing for rate limiting
//! - `CrawlSession`: Owns the frontier, the visited set and the run counters

mod domain_state;
mod page_state;
mod session;

// Re-export main types
pub use domain_state::DomainState;
pub use page_state::PageState;
pub use session::{CrawlSession, Frontier, VisitedSet};
