// src/link.rs
// =============================================================================
// The Link value type.
//
// A Link is one hyperlink as it was found in a page: the raw href, the page
// it was found on, and the anchor text. After it has been fetched it also
// carries its classification (alive or dead) and, for live HTML pages, the
// response body so the crawler can look for more links in it.
//
// The *absolute target* (href resolved against the page it was found on) is
// the identity of a link. Two links with the same absolute target are the
// same link no matter where they were discovered.
// =============================================================================

use serde::{Deserialize, Serialize};
use url::Url;

/// Title given to the seed link, which has no anchor text
pub const SEED_TITLE: &str = "<Initial URL>";

/// Title used when an anchor has no text (e.g. it wraps an image)
pub const UNTITLED: &str = "<untitled>";

/// Classification of a link
///
/// Moves from Unchecked to Alive or Dead exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStatus {
    Unchecked,
    Alive,
    Dead,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// The href exactly as written in the source HTML
    pub relative_target: String,
    /// Absolute URL of the page this link was found on (None for the seed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_on: Option<String>,
    /// Anchor text, for reporting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub status: LinkStatus,
    /// Response body, kept only for live parsable pages until links are extracted
    #[serde(skip)]
    pub body: Option<String>,
}

impl Link {
    /// The link the crawl starts from
    pub fn seed(url: impl Into<String>) -> Self {
        Link {
            relative_target: url.into(),
            found_on: None,
            title: Some(SEED_TITLE.to_string()),
            status: LinkStatus::Unchecked,
            body: None,
        }
    }

    /// A link discovered on the page `found_on`
    pub fn discovered(
        relative_target: impl Into<String>,
        title: impl Into<String>,
        found_on: impl Into<String>,
    ) -> Self {
        Link {
            relative_target: relative_target.into(),
            found_on: Some(found_on.into()),
            title: Some(title.into()),
            status: LinkStatus::Unchecked,
            body: None,
        }
    }

    /// Canonical URL of this link, used for deduplication and scoping
    ///
    /// The fragment is dropped: `page#a` and `page#b` are the same document
    /// and produce a single Visited entry. Plain URL joining would keep the
    /// fragment and count them as two links, so crawl totals are lower here
    /// on pages that link to their own anchors.
    /// When the href cannot be resolved the raw href is returned unchanged.
    pub fn absolute_target(&self) -> String {
        let resolved = match &self.found_on {
            Some(page) => Url::parse(page).and_then(|base| base.join(&self.relative_target)),
            None => Url::parse(&self.relative_target),
        };

        match resolved {
            Ok(mut url) => {
                url.set_fragment(None);
                url.to_string()
            }
            Err(_) => self.relative_target.clone(),
        }
    }

    pub fn is_dead(&self) -> bool {
        self.status == LinkStatus::Dead
    }

    pub fn is_checked(&self) -> bool {
        self.status != LinkStatus::Unchecked
    }

    /// Marks the link dead and drops any body
    pub(crate) fn mark_dead(mut self) -> Self {
        self.status = LinkStatus::Dead;
        self.body = None;
        self
    }

    /// Marks the link alive, keeping `body` for link extraction
    pub(crate) fn mark_alive(mut self, body: Option<String>) -> Self {
        self.status = LinkStatus::Alive;
        self.body = body;
        self
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.absolute_target())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_its_own_target() {
        let link = Link::seed("https://example.com/start.html");
        assert_eq!(link.absolute_target(), "https://example.com/start.html");
        assert_eq!(link.status, LinkStatus::Unchecked);
        assert!(link.found_on.is_none());
    }

    #[test]
    fn test_relative_link_resolves_against_page() {
        let link = Link::discovered("../about.html", "About", "https://example.com/docs/index.html");
        assert_eq!(link.absolute_target(), "https://example.com/about.html");
    }

    #[test]
    fn test_absolute_href_ignores_page() {
        let link = Link::discovered("https://other.org/x", "X", "https://example.com/");
        assert_eq!(link.absolute_target(), "https://other.org/x");
    }

    #[test]
    fn test_empty_href_is_the_page_itself() {
        let link = Link::discovered("", "Self", "https://example.com/page");
        assert_eq!(link.absolute_target(), "https://example.com/page");
    }

    #[test]
    fn test_fragment_is_dropped() {
        let a = Link::discovered("/page#top", "Top", "https://example.com/");
        let b = Link::discovered("/page#bottom", "Bottom", "https://example.com/");
        assert_eq!(a.absolute_target(), b.absolute_target());
        assert_eq!(a.absolute_target(), "https://example.com/page");
    }

    #[test]
    fn test_unresolvable_href_falls_back_to_raw() {
        let link = Link::discovered("http://[broken", "Broken", "https://example.com/");
        assert_eq!(link.absolute_target(), "http://[broken");
    }

    #[test]
    fn test_classification_drops_body_when_dead() {
        let link = Link::seed("https://example.com/")
            .mark_alive(Some("<html></html>".to_string()))
            .mark_dead();
        assert!(link.is_dead());
        assert!(link.body.is_none());
    }

    #[test]
    fn test_body_is_not_serialized() {
        let link = Link::seed("https://example.com/").mark_alive(Some("secret body".to_string()));
        let json = serde_json::to_string(&link).unwrap();
        assert!(!json.contains("secret body"));
        assert!(json.contains("\"status\":\"alive\""));
    }
}
