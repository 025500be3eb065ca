//! Anchor discovery and [`Link`] construction

use scraper::Node;
use tracing::debug;

use super::document::Document;
use super::text::extract_text;
use super::tree_search::{NodeHandle, find_all};
use super::DocumentParser;
use crate::domain::Link;

/// Matches `<a>` elements
pub fn is_anchor(node: &Node) -> bool {
    node.as_element().is_some_and(|element| element.name() == "a")
}

/// Build a link from an anchor node.
///
/// A missing `href` becomes an empty string.
pub fn build_link(anchor: NodeHandle<'_>) -> Link {
    let href = anchor
        .value()
        .as_element()
        .and_then(|element| element.attr("href"))
        .unwrap_or_default();

    Link::new(href, extract_text(anchor))
}

/// Collects every anchor of a document as a [`Link`]
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkParser;

impl DocumentParser for LinkParser {
    type Output = Vec<Link>;
    type Config = ();

    fn parse(&self, document: &Document, _config: &Self::Config) -> Self::Output {
        let links: Vec<Link> = find_all(document.root(), &is_anchor)
            .into_iter()
            .map(build_link)
            .collect();

        debug!("Extracted {} links", links.len());
        links
    }
}

/// Parse `html` and return its links in document order
pub fn parse_links(html: &str) -> Vec<Link> {
    LinkParser.parse(&Document::parse(html), &())
}
