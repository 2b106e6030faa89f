use serde::Deserialize;

/// Default request timeout for a single page fetch (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default minimum delay between two fetches to the same domain (milliseconds)
pub const DEFAULT_MINIMUM_DELAY_MS: u64 = 1000;

/// Default directory for export artifacts
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "exports";

/// Main configuration structure for Page-Trawler
///
/// Every table and key is optional; a missing config file is equivalent to an
/// empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Timeout for a single page fetch, connect through body (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Minimum time between requests to the same domain (milliseconds)
    #[serde(rename = "minimum-delay-ms")]
    pub minimum_delay_ms: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            minimum_delay_ms: DEFAULT_MINIMUM_DELAY_MS,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the export artifacts are written to
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_OUTPUT_DIRECTORY.to_string(),
        }
    }
}
