/// Page state definitions for tracking crawl progress
///
/// A URL moves `Unseen -> Enqueued -> InFlight -> {Visited | Failed}`.
/// `Visited` is permanent for the run. A dispatch abandoned on cancellation
/// goes from `InFlight` back to `Enqueued`. `Failed` is not remembered
/// anywhere: a URL that failed reports as `Unseen` again and may be
/// re-enqueued if another page links to it.
use std::fmt;

/// Represents the current state of a page in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Never seen, or seen and forgotten after a failure
    Unseen,

    /// Waiting in the frontier
    Enqueued,

    /// Currently being fetched and parsed
    InFlight,

    /// Fetched and parsed successfully
    Visited,

    /// Fetch or parse failed during this attempt
    Failed,
}

impl PageState {
    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Unseen, Self::Enqueued)
                | (Self::Enqueued, Self::Enqueued)
                | (Self::Enqueued, Self::InFlight)
                | (Self::InFlight, Self::Visited)
                | (Self::InFlight, Self::Failed)
                | (Self::InFlight, Self::Enqueued)
                | (Self::Failed, Self::Enqueued)
        )
    }

    /// Short lowercase label used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unseen => "unseen",
            Self::Enqueued => "enqueued",
            Self::InFlight => "in_flight",
            Self::Visited => "visited",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
