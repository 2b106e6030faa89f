//! Statistics for a finished crawl
//!
//! This module turns a [`CrawlReport`] into the summary printed at the end of
//! a run.

use crate::crawler::CrawlReport;
use std::fmt::Write;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// Crawl domain
    pub domain: String,

    /// Pages fetched and parsed successfully
    pub pages_visited: u64,

    /// Fetch attempts that were abandoned
    pub pages_failed: u64,

    /// Frontier entries dropped without a fetch
    pub pages_skipped: u64,

    /// Duration of the crawl loop
    pub elapsed: Duration,

    /// Whether the crawl stopped early
    pub cancelled: bool,
}

impl CrawlStatistics {
    /// Builds statistics from a crawl report
    pub fn from_report(report: &CrawlReport) -> Self {
        Self {
            domain: report.domain.clone(),
            pages_visited: report.visited_count,
            pages_failed: report.failed_count,
            pages_skipped: report.skipped_count,
            elapsed: report.elapsed,
            cancelled: report.cancelled,
        }
    }

    /// Returns the number of fetch attempts
    pub fn attempts(&self) -> u64 {
        self.pages_visited + self.pages_failed
    }

    /// Returns the share of fetch attempts that succeeded, as a percentage
    pub fn success_rate(&self) -> f64 {
        let attempts = self.attempts();
        if attempts == 0 {
            return 0.0;
        }
        (self.pages_visited as f64 / attempts as f64) * 100.0
    }

    /// Returns successful visits per second of crawl time
    pub fn pages_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.pages_visited as f64 / seconds
    }
}

/// Formats statistics as a plain-text block
pub fn format_statistics(stats: &CrawlStatistics) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Crawl Statistics ===");
    let _ = writeln!(out, "  Domain: {}", stats.domain);
    let _ = writeln!(out, "  Pages visited: {}", stats.pages_visited);
    let _ = writeln!(out, "  Pages failed: {}", stats.pages_failed);
    let _ = writeln!(out, "  Frontier entries skipped: {}", stats.pages_skipped);
    let _ = writeln!(
        out,
        "  Success rate: {:.1}% ({} / {} attempts)",
        stats.success_rate(),
        stats.pages_visited,
        stats.attempts()
    );
    let _ = writeln!(
        out,
        "  Elapsed: {:.1}s ({:.2} pages/sec)",
        stats.elapsed.as_secs_f64(),
        stats.pages_per_second()
    );
    if stats.cancelled {
        let _ = writeln!(out, "  Crawl was cancelled before the frontier emptied");
    }

    out
}

/// Prints statistics to stdout
pub fn print_statistics(stats: &CrawlStatistics) {
    print!("{}", format_statistics(stats));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_stats() -> CrawlStatistics {
        CrawlStatistics {
            domain: "example.com".to_string(),
            pages_visited: 8,
            pages_failed: 2,
            pages_skipped: 5,
            elapsed: Duration::from_secs(4),
            cancelled: false,
        }
    }

    #[test]
    fn test_from_report() {
        let report = CrawlReport {
            seed: "https://example.com/".to_string(),
            domain: "example.com".to_string(),
            visited: vec!["https://example.com/".to_string()],
            visited_count: 1,
            failed_count: 3,
            skipped_count: 2,
            elapsed: Duration::from_millis(1500),
            cancelled: true,
        };

        let stats = CrawlStatistics::from_report(&report);
        assert_eq!(stats.pages_visited, 1);
        assert_eq!(stats.pages_failed, 3);
        assert_eq!(stats.pages_skipped, 2);
        assert!(stats.cancelled);
    }

    #[test]
    fn test_success_rate() {
        let stats = create_test_stats();
        assert!((stats.success_rate() - 80.0).abs() < 0.01);
    }

    #[test]
    fn test_success_rate_no_attempts() {
        let stats = CrawlStatistics {
            pages_visited: 0,
            pages_failed: 0,
            ..create_test_stats()
        };
        assert_eq!(stats.success_rate(), 0.0);
    }

    #[test]
    fn test_pages_per_second() {
        let stats = create_test_stats();
        assert!((stats.pages_per_second() - 2.0).abs() < 0.01);

        let instant = CrawlStatistics {
            elapsed: Duration::ZERO,
            ..create_test_stats()
        };
        assert_eq!(instant.pages_per_second(), 0.0);
    }

    #[test]
    fn test_format_statistics() {
        let text = format_statistics(&create_test_stats());
        assert!(text.contains("Pages visited: 8"));
        assert!(text.contains("Success rate: 80.0% (8 / 10 attempts)"));
        assert!(!text.contains("cancelled"));
    }
}
