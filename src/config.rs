// src/config.rs
// =============================================================================
// Crawl configuration.
//
// A CrawlConfig is built once (from CLI flags and/or a JSON file) and then
// stays read-only for the whole crawl. validate() is the only place a crawl
// can fail as a whole: it runs before any request is sent.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;
use crate::scope::DomainScope;

pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 10;
pub const DEFAULT_ERROR_TEXT: &str = "Not Found";
pub const DEFAULT_DEAD_STATUS_THRESHOLD: u16 = 401;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// URL the crawl starts from; its domain bounds the crawl
    pub seed_url: String,

    /// Hard ceiling on simultaneous fetches
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// A page whose body contains this text is dead (soft-404 detection)
    #[serde(default = "default_error_text")]
    pub error_text: String,

    /// HEAD responses with a status at or above this are dead
    #[serde(default = "default_dead_status_threshold")]
    pub dead_status_threshold: u16,

    /// Report dead links as soon as they are found
    #[serde(default = "default_verbose")]
    pub verbose: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl CrawlConfig {
    pub fn new(seed_url: impl Into<String>) -> Self {
        CrawlConfig {
            seed_url: seed_url.into(),
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
            error_text: DEFAULT_ERROR_TEXT.to_string(),
            dead_status_threshold: DEFAULT_DEAD_STATUS_THRESHOLD,
            verbose: default_verbose(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Loads a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = max;
        self
    }

    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    pub fn with_dead_status_threshold(mut self, status: u16) -> Self {
        self.dead_status_threshold = status;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Checks the configuration and returns the crawl's domain scope
    pub fn validate(&self) -> Result<DomainScope, ConfigError> {
        let seed = Url::parse(&self.seed_url).map_err(|e| ConfigError::InvalidSeedUrl {
            url: self.seed_url.clone(),
            reason: e.to_string(),
        })?;

        if seed.scheme() != "http" && seed.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(self.seed_url.clone()));
        }

        if self.max_concurrent_requests == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        DomainScope::from_seed(&self.seed_url)
            .ok_or_else(|| ConfigError::MissingHost(self.seed_url.clone()))
    }
}

fn default_max_concurrent_requests() -> usize {
    DEFAULT_MAX_CONCURRENT_REQUESTS
}

fn default_error_text() -> String {
    DEFAULT_ERROR_TEXT.to_string()
}

fn default_dead_status_threshold() -> u16 {
    DEFAULT_DEAD_STATUS_THRESHOLD
}

fn default_verbose() -> bool {
    true
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CrawlConfig::new("https://example.com");
        assert_eq!(config.max_concurrent_requests, 10);
        assert_eq!(config.error_text, "Not Found");
        assert_eq!(config.dead_status_threshold, 401);
        assert!(config.verbose);
    }

    #[test]
    fn test_json_defaults_fill_missing_fields() {
        let config: CrawlConfig =
            serde_json::from_str(r#"{"seed_url": "https://example.com", "verbose": false}"#)
                .unwrap();
        assert_eq!(config.max_concurrent_requests, 10);
        assert_eq!(config.request_timeout_secs, 10);
        assert!(!config.verbose);
    }

    #[test]
    fn test_validate_returns_scope() {
        let scope = CrawlConfig::new("https://www.example.com/start").validate().unwrap();
        assert_eq!(scope.domain(), "example.com");
    }

    #[test]
    fn test_validate_rejects_bad_seed() {
        let err = CrawlConfig::new("not a url").validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSeedUrl { .. }));

        let err = CrawlConfig::new("ftp://example.com/").validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(_)));
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let err = CrawlConfig::new("https://example.com")
            .with_max_concurrent_requests(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroConcurrency));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let err = CrawlConfig::new("https://example.com")
            .with_request_timeout_secs(0)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTimeout));

        let config: CrawlConfig = serde_json::from_str(
            r#"{"seed_url": "https://example.com", "request_timeout_secs": 0}"#,
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));

        assert!(CrawlConfig::new("https://example.com")
            .with_request_timeout_secs(1)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_missing_config_file() {
        let err = CrawlConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
