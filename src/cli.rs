// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Every crawl setting can come from a flag, from a JSON config file
// (--config), or from the built-in default, in that order of priority.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use dead_link_crawler::config::CrawlConfig;
use dead_link_crawler::ConfigError;

#[derive(Parser, Debug)]
#[command(
    name = "dead-link-crawler",
    version,
    about = "Crawl a website and report its dead internal links",
    long_about = "dead-link-crawler starts at a URL, follows every link that stays on the same \
                  domain, and reports the links that are dead. \
                  Exit code 0 means no dead links, 1 means dead links were found."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website starting from a URL
    ///
    /// Example: dead-link-crawler crawl https://example.com --max-requests 20
    Crawl {
        /// URL to start crawling from (e.g., https://example.com)
        ///
        /// Optional when --config names a file with a seed_url
        url: Option<String>,

        /// Read settings from a JSON config file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Maximum number of requests in flight at once (default: 10)
        #[arg(long)]
        max_requests: Option<usize>,

        /// Pages whose body contains this text are dead (default: "Not Found")
        #[arg(long)]
        error_text: Option<String>,

        /// HTTP status at or above which a link is dead (default: 401)
        #[arg(long)]
        status_threshold: Option<u16>,

        /// Per-request timeout in seconds (default: 10)
        #[arg(long)]
        timeout: Option<u64>,

        /// Only report dead links at the end, not as they are found
        #[arg(long, short)]
        quiet: bool,

        /// Output results in JSON format instead of a summary
        #[arg(long)]
        json: bool,
    },
}

/// Builds the crawl configuration from the `crawl` subcommand's arguments
#[allow(clippy::too_many_arguments)]
pub fn build_config(
    url: Option<String>,
    config: Option<PathBuf>,
    max_requests: Option<usize>,
    error_text: Option<String>,
    status_threshold: Option<u16>,
    timeout: Option<u64>,
    quiet: bool,
) -> Result<CrawlConfig, ConfigError> {
    let mut crawl_config = match (config, url) {
        (Some(path), url) => {
            let mut from_file = CrawlConfig::from_file(path)?;
            if let Some(url) = url {
                from_file.seed_url = url;
            }
            from_file
        }
        (None, Some(url)) => CrawlConfig::new(url),
        (None, None) => {
            return Err(ConfigError::InvalidSeedUrl {
                url: String::new(),
                reason: "no URL given (pass a URL or --config)".to_string(),
            })
        }
    };

    if let Some(max) = max_requests {
        crawl_config.max_concurrent_requests = max;
    }
    if let Some(text) = error_text {
        crawl_config.error_text = text;
    }
    if let Some(status) = status_threshold {
        crawl_config.dead_status_threshold = status;
    }
    if let Some(secs) = timeout {
        crawl_config.request_timeout_secs = secs;
    }
    if quiet {
        crawl_config.verbose = false;
    }

    Ok(crawl_config)
}
