// src/crawl/mod.rs
// =============================================================================
// This module handles crawling a website.
//
// Features:
// - Breadth-first crawl starting from a seed URL
// - Stays on the seed's domain (subdomains included)
// - Every distinct link is fetched exactly once
// - A fixed number of requests in flight at any time
//
// Submodules:
// - frontier: the queue of links to fetch and the set of links already fetched
// - scheduler: the loop that dispatches fetches and collects their results
// =============================================================================

mod frontier;
mod scheduler;

pub use frontier::{Frontier, VisitedSlot};
pub use scheduler::{
    CrawlState, Crawler, ProgressHandle, ProgressSnapshot, STATUS_INTERVAL,
};

use crate::checker::{HtmlLinkExtractor, HttpFetcher};
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::link::Link;

/// Crawls the site described by `config` with the real HTTP client
///
/// Returns every checked link, each Alive or Dead. The only error is a bad
/// configuration, reported before any request is sent.
pub async fn start_crawl(config: CrawlConfig) -> Result<Vec<Link>, CrawlError> {
    // Validate first so a bad seed never builds a client
    config.validate()?;

    let fetcher = HttpFetcher::new(config.request_timeout())?;
    let crawler = Crawler::new(config, fetcher, HtmlLinkExtractor::new())?;

    Ok(crawler.run().await)
}

/// Blocking version of start_crawl() for callers without an async runtime
pub fn start_crawl_blocking(config: CrawlConfig) -> Result<Vec<Link>, CrawlError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(start_crawl(config))
}
