//! URL handling module for Page-Trawler
//!
//! This module provides seed parsing, domain extraction and the URL classifier
//! that decides whether a candidate URL may ever enter the frontier.

mod domain;
mod matcher;
mod normalize;

use crate::state::VisitedSet;

// Re-export main functions
pub use domain::{domain_of, extract_domain};
pub use matcher::{has_fragment, is_media_file, is_pagination_link, SKIPPED_EXTENSIONS};
pub use normalize::parse_seed;

/// Outcome of classifying a candidate URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlClassification {
    /// May enter the frontier / may be fetched
    Admit,
    /// Already in the visited set
    AlreadyVisited,
    /// Contains a `#` fragment marker
    Fragment,
    /// Path ends with a media or document extension
    Media,
    /// Path ends with `/page/<digits>`
    Pagination,
    /// Host differs from the crawl domain, or has no host at all
    CrossDomain,
}

impl UrlClassification {
    /// Returns true if the URL may proceed
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admit)
    }

    /// Human-readable reason, used in skip log lines
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Admit => "admitted",
            Self::AlreadyVisited => "already visited",
            Self::Fragment => "fragment link",
            Self::Media => "media or document file",
            Self::Pagination => "pagination link",
            Self::CrossDomain => "outside crawl domain",
        }
    }
}

/// Applies every rule except the domain check
///
/// Order: visited, fragment, media, pagination.
fn classify_common(url: &str, visited: &VisitedSet) -> UrlClassification {
    if visited.contains(url) {
        return UrlClassification::AlreadyVisited;
    }

    if has_fragment(url) {
        return UrlClassification::Fragment;
    }

    if is_media_file(url) {
        return UrlClassification::Media;
    }

    if is_pagination_link(url) {
        return UrlClassification::Pagination;
    }

    UrlClassification::Admit
}

/// Classifies a discovered link before it enters the frontier
///
/// A URL is rejected if any of the following holds:
/// 1. It is already in `visited`
/// 2. It contains `#` anywhere
/// 3. Its path ends with a media/document extension (case-insensitive)
/// 4. Its path ends with `/page/<digits>`, optionally followed by `/`
/// 5. Its domain is not exactly `domain`
///
/// # Examples
///
/// ```
/// use page_trawler::state::VisitedSet;
/// use page_trawler::url::{classify_url, UrlClassification};
///
/// let visited = VisitedSet::new();
/// assert_eq!(
///     classify_url("https://example.com/about", "example.com", &visited),
///     UrlClassification::Admit
/// );
/// assert_eq!(
///     classify_url("https://other.com/about", "example.com", &visited),
///     UrlClassification::CrossDomain
/// );
/// ```
pub fn classify_url(url: &str, domain: &str, visited: &VisitedSet) -> UrlClassification {
    match classify_common(url, visited) {
        UrlClassification::Admit => {}
        rejected => return rejected,
    }

    match domain_of(url) {
        Some(candidate) if candidate == domain => UrlClassification::Admit,
        _ => UrlClassification::CrossDomain,
    }
}

/// Classifies a URL as it is taken off the frontier
///
/// Same rules as [`classify_url`] without the domain check: the seed is trusted
/// and every other frontier entry passed the domain check when it was enqueued.
pub fn classify_dequeued(url: &str, visited: &VisitedSet) -> UrlClassification {
    classify_common(url, visited)
}

/// Returns true if a discovered link may enter the frontier
pub fn should_enqueue(url: &str, domain: &str, visited: &VisitedSet) -> bool {
    classify_url(url, domain, visited).is_admitted()
}
