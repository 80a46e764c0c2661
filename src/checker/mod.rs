// src/checker/mod.rs
// =============================================================================
// This module contains everything that happens to a single link.
//
// Submodules:
// - http: fetches a link (HEAD, then maybe GET) and classifies it
// - html: extracts raw links from a live page's body
//
// Both sides sit behind traits (Fetcher, LinkExtractor) so the crawl loop
// can be driven by an in-memory site in tests.
// =============================================================================

mod html;
mod http;

pub use html::{HtmlLinkExtractor, LinkExtractor, RawLink};
pub use http::{
    classify, is_parsable, ClassifyPolicy, Fetcher, GetResponse, HeadResponse, HttpFetcher,
    PARSABLE_CONTENT_TYPES,
};
