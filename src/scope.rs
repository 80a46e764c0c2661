// src/scope.rs
// =============================================================================
// Decides whether a link belongs to the website being crawled.
//
// The "registered domain" is approximated as the last two dot-separated
// labels of the host: docs.example.com -> example.com. No public suffix list
// is consulted, so hosts like a.co.uk and b.co.uk both reduce to co.uk and
// are treated as the same site. This is a known limitation.
//
// Ports and schemes are ignored; links without a host (mailto:, tel:,
// javascript:, unresolvable hrefs) are never in scope.
// =============================================================================

use url::Url;

use crate::link::Link;

/// Reduces a host to its last two labels
///
/// Examples:
///   "www.example.com" -> "example.com"
///   "example.com"     -> "example.com"
///   "localhost"       -> "localhost"
pub fn registered_domain(host: &str) -> String {
    let host = host.trim_end_matches('.').to_lowercase();
    let labels: Vec<&str> = host.split('.').collect();
    let start = labels.len().saturating_sub(2);
    labels[start..].join(".")
}

/// Registered domain of an absolute URL, if it has a host
pub fn domain_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(registered_domain)
}

/// The crawl's target domain, fixed at crawl start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainScope {
    domain: String,
}

impl DomainScope {
    pub fn new(domain: impl Into<String>) -> Self {
        DomainScope { domain: domain.into() }
    }

    /// Builds the scope from the seed URL, or None if it has no host
    pub fn from_seed(seed_url: &str) -> Option<Self> {
        domain_of(seed_url).map(DomainScope::new)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// True iff the link's absolute target shares the crawl's registered domain
    pub fn contains(&self, link: &Link) -> bool {
        self.contains_url(&link.absolute_target())
    }

    pub fn contains_url(&self, url: &str) -> bool {
        domain_of(url).is_some_and(|domain| domain == self.domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> DomainScope {
        DomainScope::from_seed("https://example.com/start").unwrap()
    }

    #[test]
    fn test_registered_domain_takes_last_two_labels() {
        assert_eq!(registered_domain("a.b.example.com"), "example.com");
        assert_eq!(registered_domain("Example.COM"), "example.com");
        assert_eq!(registered_domain("localhost"), "localhost");
    }

    #[test]
    fn test_subdomain_is_in_scope() {
        assert!(scope().contains_url("https://sub.example.com/page"));
    }

    #[test]
    fn test_similar_domain_is_out_of_scope() {
        assert!(!scope().contains_url("https://notexample.com/"));
        assert!(!scope().contains_url("https://otherexample.com/"));
    }

    #[test]
    fn test_port_and_scheme_are_ignored() {
        assert!(scope().contains_url("http://example.com:8080/x"));
    }

    #[test]
    fn test_links_without_host_are_out_of_scope() {
        let link = Link::discovered("mailto:someone@example.com", "Mail", "https://example.com/");
        assert!(!scope().contains(&link));
        let link = Link::discovered("javascript:void(0)", "JS", "https://example.com/");
        assert!(!scope().contains(&link));
    }

    #[test]
    fn test_shared_two_label_suffix_is_treated_as_internal() {
        // Known limitation: no public suffix list
        let scope = DomainScope::from_seed("https://shop.co.uk/").unwrap();
        assert!(scope.contains_url("https://unrelated.co.uk/"));
    }

    #[test]
    fn test_relative_link_uses_parent_host() {
        let link = Link::discovered("/about", "About", "https://www.example.com/");
        assert!(scope().contains(&link));
    }
}
