// src/error.rs
// =============================================================================
// Error types for the crawler.
//
// There are only two kinds of failure we care about:
// - ConfigError: the crawl cannot start (bad seed URL, zero concurrency...)
// - FetchError: one request failed at the transport level
//
// A ConfigError is fatal and goes back to the caller before any request is
// sent. A FetchError never leaves the fetch operation: it is turned into a
// Dead classification for that single link.
// =============================================================================

use thiserror::Error;

/// Problems with the crawl configuration, detected before the crawl starts
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid seed URL '{url}': {reason}")]
    InvalidSeedUrl { url: String, reason: String },

    #[error("seed URL '{0}' must use http or https")]
    UnsupportedScheme(String),

    #[error("seed URL '{0}' has no host to crawl")]
    MissingHost(String),

    #[error("max concurrent requests must be at least 1")]
    ZeroConcurrency,

    #[error("request timeout must be at least 1 second")]
    ZeroTimeout,

    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Transport-level failure of a single HEAD or GET request
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for FetchError {
    // Sorts reqwest failures into timeout, connection, TLS and everything else
    fn from(error: reqwest::Error) -> Self {
        let message = error.to_string();

        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_connect() {
            FetchError::Connect(message)
        } else if message.contains("certificate") || message.to_lowercase().contains("tls") {
            FetchError::Tls(message)
        } else {
            FetchError::Request(message)
        }
    }
}

/// Anything that stops a crawl from starting
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not create HTTP client: {0}")]
    Client(#[from] FetchError),

    #[error("could not start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
