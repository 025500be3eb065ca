//! Domain module - records produced by the extraction core
//!
//! - [`Link`]: an anchor's target and text
//! - [`Event`]: one venue listing, plus [`ExtractedEvent`] which also reports
//!   the fields that could not be located

pub mod event;
pub mod link;

pub use event::{Event, EventField, ExtractedEvent};
pub use link::Link;
