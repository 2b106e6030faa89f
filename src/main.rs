//! Page-Trawler main entry point
//!
//! This is the command-line interface for the Page-Trawler crawler.

use anyhow::Context;
use clap::Parser;
use page_trawler::config::{load_config_with_hash, Config};
use page_trawler::crawler::crawl;
use page_trawler::output::{export_all, print_statistics, CrawlStatistics, ExportFormat};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Page-Trawler: a single-domain web crawler
///
/// Visits every page reachable from the seed URL on the same host, breadth
/// first, one request at a time, and exports the list of visited pages.
#[derive(Parser, Debug)]
#[command(name = "page-trawler")]
#[command(version)]
#[command(about = "A single-domain web crawler", long_about = None)]
struct Cli {
    /// The website URL to crawl
    #[arg(short = 'w', long, value_name = "URL")]
    website: String,

    /// Export crawled data as CSV
    #[arg(short = 'c', long)]
    csv: bool,

    /// Export crawled data as XLSX
    #[arg(short = 'x', long)]
    xlsx: bool,

    /// Export crawled data as JSON
    #[arg(short = 'j', long)]
    json: bool,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Directory for export files (overrides the config file)
    #[arg(short = 'o', long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Export formats selected on the command line, in a fixed order
    fn export_formats(&self) -> Vec<ExportFormat> {
        [
            (self.csv, ExportFormat::Csv),
            (self.xlsx, ExportFormat::Xlsx),
            (self.json, ExportFormat::Json),
        ]
        .into_iter()
        .filter_map(|(selected, format)| selected.then_some(format))
        .collect()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(&cli)?;
    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));

    let cancel = CancellationToken::new();
    spawn_interrupt_handler(cancel.clone());

    let report = crawl(&config, &cli.website, cancel)
        .await
        .with_context(|| format!("Failed to start crawl of {}", cli.website))?;

    if !cli.quiet {
        print_statistics(&CrawlStatistics::from_report(&report));
    }

    let formats = cli.export_formats();
    export_all(&report.visited, &formats, &output_dir)
        .with_context(|| format!("Failed to export to {}", output_dir.display()))?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_trawler=info,warn"),
            1 => EnvFilter::new("page_trawler=debug,info"),
            2 => EnvFilter::new("page_trawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if one was given, otherwise the defaults
fn load_configuration(cli: &Cli) -> anyhow::Result<Config> {
    let Some(path) = &cli.config else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    let (config, hash) = load_config_with_hash(path)
        .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    Ok(config)
}

/// Cancels the crawl on Ctrl-C; the page in flight is allowed to finish
fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing current page and stopping");
            cancel.cancel();
        }
    });
}
