//! Parsed HTML document
//!
//! Wraps `scraper::Html`. The document owns the whole node tree; every
//! [`NodeHandle`] handed out borrows from it and cannot outlive it. After
//! parsing, the tree is only ever exposed through shared borrows.

use std::io::Read;

use scraper::Html;
use tracing::debug;

use super::error::{ScrapeError, ScrapeResult};
use super::tree_search::NodeHandle;

#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a complete HTML document.
    ///
    /// The parser is lenient: any string produces a tree, so this cannot fail.
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        if !html.errors.is_empty() {
            debug!("Parser recovered from {} markup errors", html.errors.len());
        }
        Self { html }
    }

    /// Read a complete document from a byte stream and parse it.
    ///
    /// A failing reader or bytes that are not UTF-8 are the only hard failures
    /// of the extraction core.
    pub fn from_reader<R: Read>(mut reader: R) -> ScrapeResult<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| ScrapeError::document_read(&e))?;

        let source = String::from_utf8(bytes).map_err(|e| ScrapeError::InvalidEncoding {
            valid_up_to: e.utf8_error().valid_up_to(),
        })?;

        Ok(Self::parse(&source))
    }

    /// The document node at the top of the tree
    pub fn root(&self) -> NodeHandle<'_> {
        self.html.tree.root()
    }
}
