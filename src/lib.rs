//! Venue Scraper - HTML extraction for venue programme pages
//!
//! Parses an HTML document into a tree and extracts either every hyperlink or
//! every event listing described by a declarative [`ExtractionProfile`].
//! Extraction never fails on a miss: absent nodes yield empty sequences or
//! empty strings.
//!
//! ```
//! use venue_scraper::{parse_links, Link};
//!
//! let links = parse_links(r#"<a href="/x">Hi <b>there</b></a>"#);
//! assert_eq!(links, vec![Link::new("/x", "Hi there")]);
//! ```

pub mod domain;
pub mod infrastructure;

pub use domain::{Event, EventField, ExtractedEvent, Link};
pub use infrastructure::parsing::{
    Document, DocumentParser, EventExtractor, ExtractionProfile, LinkParser, NodeMatcher,
    ProfileRegistry, extract_text, find_all, find_first, parse_events, parse_events_detailed,
    parse_links,
};
pub use infrastructure::{ScrapeError, ScrapeResult};
