// src/lib.rs
// =============================================================================
// dead-link-crawler: crawl one website and find its dead internal links.
//
// The library holds the whole crawl engine; src/main.rs is a small CLI on
// top of it. The simplest entry point is:
//
//     let links = dead_link_crawler::start_crawl(CrawlConfig::new(url)).await?;
//
// For tests or custom transports, build a Crawler with your own Fetcher
// and LinkExtractor instead.
// =============================================================================

pub mod checker;
pub mod config;
pub mod crawl;
pub mod error;
pub mod link;
pub mod report;
pub mod scope;

pub use checker::{Fetcher, HtmlLinkExtractor, HttpFetcher, LinkExtractor};
pub use config::CrawlConfig;
pub use crawl::{start_crawl, start_crawl_blocking, CrawlState, Crawler, ProgressHandle, ProgressSnapshot};
pub use error::{ConfigError, CrawlError, FetchError};
pub use link::{Link, LinkStatus};
pub use scope::DomainScope;
