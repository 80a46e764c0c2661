// src/checker/html.rs
// =============================================================================
// This module extracts raw links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (built on html5ever, Mozilla's HTML parser)
// - Supports CSS selectors for finding elements
// - Never fails: broken markup is repaired the same way a browser does it
//
// The extractor returns hrefs exactly as written. Resolving them against the
// page URL is the job of Link::absolute_target().
// =============================================================================

use scraper::{Html, Selector};

use crate::link::UNTITLED;

/// One <a href> found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    pub href: String,
    pub title: String,
}

/// Turns a document body into the links it contains
///
/// Extraction always succeeds, possibly with zero links.
pub trait LinkExtractor: Send + Sync {
    fn extract(&self, html: &str) -> Vec<RawLink>;
}

/// LinkExtractor for HTML/XHTML using `scraper`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        HtmlLinkExtractor
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    fn extract(&self, html: &str) -> Vec<RawLink> {
        // Selects all <a> tags with an href attribute
        let Ok(anchors) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        let document = Html::parse_document(html);

        let links = document
            .select(&anchors)
            .filter_map(|element| {
                let href = element.value().attr("href")?;
                let text = element.text().collect::<String>();
                let title = text.split_whitespace().collect::<Vec<_>>().join(" ");

                Some(RawLink {
                    href: href.to_string(),
                    title: if title.is_empty() { UNTITLED.to_string() } else { title },
                })
            })
            .collect();

        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> Vec<RawLink> {
        HtmlLinkExtractor::new().extract(html)
    }

    #[test]
    fn test_extract_keeps_href_as_written() {
        let links = extract(r#"<a href="../about">About us</a>"#);
        assert_eq!(
            links,
            vec![RawLink { href: "../about".to_string(), title: "About us".to_string() }]
        );
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let links = extract(r#"<a name="top">Top</a><a href="/x">X</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "/x");
    }

    #[test]
    fn test_image_link_gets_placeholder_title() {
        let links = extract(r#"<a href="/home"><img src="logo.png"></a>"#);
        assert_eq!(links[0].title, "<untitled>");
    }

    #[test]
    fn test_title_whitespace_is_collapsed() {
        let links = extract("<a href=\"/docs\">\n   Read\n   the <b>docs</b>\n</a>");
        assert_eq!(links[0].title, "Read the docs");
    }

    #[test]
    fn test_malformed_html_is_best_effort() {
        let links = extract(r#"<p><a href="/one">One</a><p><a href="/two">Two"#);
        let hrefs: Vec<_> = links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(hrefs, vec!["/one", "/two"]);
    }

    #[test]
    fn test_no_links() {
        assert!(extract("<html><body>plain text</body></html>").is_empty());
        assert!(extract("").is_empty());
    }
}
