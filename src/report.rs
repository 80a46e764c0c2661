// src/report.rs
// =============================================================================
// Turns the finished crawl into something a person (or a CI job) can read.
//
// - Human summary: how many links were checked, and the dead ones grouped
//   by the page they were found on
// - JSON: the full list of checked links (bodies are never included)
// =============================================================================

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;

use crate::link::Link;

/// Dead links found on one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeadLinkGroup<'a> {
    /// The page the links were found on ("<start>" for the seed)
    pub found_on: &'a str,
    pub links: Vec<&'a Link>,
}

/// Groups dead links by the page they were found on, keeping first-seen page order
pub fn group_dead_links(links: &[Link]) -> Vec<DeadLinkGroup<'_>> {
    let mut groups: Vec<DeadLinkGroup<'_>> = Vec::new();

    for link in links.iter().filter(|l| l.is_dead()) {
        let page = link.found_on.as_deref().unwrap_or("<start>");

        match groups.iter_mut().find(|g| g.found_on == page) {
            Some(group) => group.links.push(link),
            None => groups.push(DeadLinkGroup { found_on: page, links: vec![link] }),
        }
    }

    groups
}

/// Number of dead links in a crawl result
pub fn dead_count(links: &[Link]) -> usize {
    links.iter().filter(|l| l.is_dead()).count()
}

/// Human-readable summary of a crawl
pub fn summary(links: &[Link]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} links have been checked.", links.len());

    let groups = group_dead_links(links);
    if groups.is_empty() {
        let _ = writeln!(out, "No dead links have been found.");
        return out;
    }

    for group in groups {
        let _ = writeln!(out, "On the page {}, the following links were dead:", group.found_on);
        for link in group.links {
            let _ = writeln!(out, "  Link title: {}", link.title.as_deref().unwrap_or_default());
            let _ = writeln!(out, "  Link URL: {}", link.absolute_target());
        }
    }

    out
}

/// JSON entry for one checked link
#[derive(Debug, Serialize)]
struct LinkRecord<'a> {
    url: String,
    #[serde(flatten)]
    link: &'a Link,
}

/// The whole crawl result as pretty JSON
pub fn to_json(links: &[Link]) -> Result<String> {
    let records: Vec<_> = links
        .iter()
        .map(|link| LinkRecord { url: link.absolute_target(), link })
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}
