//! HTML extraction core
//!
//! Tree search, text extraction, link building and profile-driven event
//! extraction over a parsed [`Document`]. Nothing in here performs I/O or
//! mutates the parsed tree, so independent documents can be processed in
//! parallel without coordination.

pub mod document;
pub mod error;
pub mod event_parser;
pub mod link_parser;
pub mod profile;
pub mod text;
pub mod tree_search;

// Re-export public types
pub use document::Document;
pub use error::{ScrapeError, ScrapeResult};
pub use event_parser::{EventExtractor, parse_events, parse_events_detailed};
pub use link_parser::{LinkParser, build_link, is_anchor, parse_links};
pub use profile::{
    AttributeMatch, ExtractionProfile, FieldRule, Locator, NodeMatcher, ProfileRegistry, Step,
    ValueSource,
};
pub use text::{extract_text, normalize_whitespace};
pub use tree_search::{NodeHandle, NodePredicate, find_all, find_first};

/// Parser that turns an already-parsed document into typed records
pub trait DocumentParser {
    type Output;
    type Config;

    /// Extract records from `document` using the given configuration
    fn parse(&self, document: &Document, config: &Self::Config) -> Self::Output;
}
