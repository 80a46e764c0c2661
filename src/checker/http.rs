// src/checker/http.rs
// =============================================================================
// This module decides whether a single link is alive or dead.
//
// Classification of one link:
// 1. HEAD request (lightweight, no body download)
// 2. Status at or above the threshold (401 by default) -> Dead
// 3. Content type not HTML/XML -> Alive, nothing more to download
//    (a missing Content-Type header counts as parsable)
// 4. GET the body; if it contains the error text ("Not Found") -> Dead
//    (catches "soft 404" pages served with HTTP 200)
// 5. Otherwise Alive, and the body is kept so links can be extracted
//
// Any transport failure (timeout, DNS, TLS, reset...) at any step means Dead.
// classify() never returns an error: every path ends in Alive or Dead, which
// is what keeps the crawl loop from waiting on a fetch forever.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

use crate::error::FetchError;
use crate::link::Link;

/// Content types we know how to look for links in
pub const PARSABLE_CONTENT_TYPES: [&str; 4] = [
    "text/html",
    "text/xml",
    "application/xml",
    "application/xhtml+xml",
];

/// Result of a HEAD request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResponse {
    pub status: u16,
    pub content_type: Option<String>,
}

/// Result of a GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetResponse {
    pub status: u16,
    pub body: String,
}

/// The HTTP transport used by the crawler
///
/// HttpFetcher is the real implementation; tests plug in an in-memory site.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn head(&self, url: &str) -> Result<HeadResponse, FetchError>;
    async fn get(&self, url: &str) -> Result<GetResponse, FetchError>;
}

/// Fetcher backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        // One client for the whole crawl (connection pooling)
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("dead-link-crawler/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpFetcher { client })
    }

    pub fn from_client(client: Client) -> Self {
        HttpFetcher { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn head(&self, url: &str) -> Result<HeadResponse, FetchError> {
        let response = self.client.head(url).send().await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        Ok(HeadResponse {
            status: response.status().as_u16(),
            content_type,
        })
    }

    async fn get(&self, url: &str) -> Result<GetResponse, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(GetResponse { status, body })
    }
}

/// The rules a link is classified by, fixed for the whole crawl
#[derive(Debug, Clone)]
pub struct ClassifyPolicy {
    pub error_text: String,
    pub dead_status_threshold: u16,
    /// Upper bound on the whole HEAD + GET exchange for one link
    pub deadline: Duration,
}

/// Whether a Content-Type header value names something we can parse
///
/// None (header missing) is parsable: some live servers simply omit it.
pub fn is_parsable(content_type: Option<&str>) -> bool {
    match content_type {
        None => true,
        Some(value) => {
            let value = value.to_lowercase();
            PARSABLE_CONTENT_TYPES.iter().any(|t| value.contains(t))
        }
    }
}

/// Fetches and classifies one link
///
/// The returned link is Alive or Dead, never Unchecked. Its body is only
/// set for live, parsable pages.
pub async fn classify<F>(fetcher: &F, link: Link, policy: &ClassifyPolicy) -> Link
where
    F: Fetcher + ?Sized,
{
    let url = link.absolute_target();

    match tokio::time::timeout(policy.deadline, check_url(fetcher, &url, policy)).await {
        Ok(Ok(Verdict::Alive(body))) => link.mark_alive(body),
        Ok(Ok(Verdict::Dead)) => link.mark_dead(),
        Ok(Err(e)) => {
            log::debug!("{} is dead: {}", url, e);
            link.mark_dead()
        }
        Err(_) => {
            log::debug!("{} is dead: no answer within {:?}", url, policy.deadline);
            link.mark_dead()
        }
    }
}

enum Verdict {
    Alive(Option<String>),
    Dead,
}

async fn check_url<F>(fetcher: &F, url: &str, policy: &ClassifyPolicy) -> Result<Verdict, FetchError>
where
    F: Fetcher + ?Sized,
{
    let head = fetcher.head(url).await?;

    if head.status >= policy.dead_status_threshold {
        return Ok(Verdict::Dead);
    }

    if !is_parsable(head.content_type.as_deref()) {
        return Ok(Verdict::Alive(None));
    }

    let page = fetcher.get(url).await?;

    if page.body.contains(&policy.error_text) {
        return Ok(Verdict::Dead);
    }

    Ok(Verdict::Alive(Some(page.body)))
}
