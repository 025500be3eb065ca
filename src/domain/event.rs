use serde::{Deserialize, Serialize};
use std::fmt;

/// A public event listed on a venue's programme page
///
/// Every field is a normalized string that may be empty; a listing is never
/// rejected because one of its fields could not be located.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Set from the extraction profile, not read from the markup
    pub venue: String,
    pub date: String,
    pub title: String,
    pub description: String,
}

/// The markup-derived fields of an [`Event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventField {
    Date,
    Title,
    Description,
}

impl EventField {
    /// Every field, in extraction order
    pub const ALL: [Self; 3] = [Self::Date, Self::Title, Self::Description];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Title => "title",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event together with the fields whose source node could not be located
///
/// `missing` separates "the node was absent" from "the node was there but
/// empty": a located title element with no text yields an empty `title`
/// without appearing in `missing`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEvent {
    pub event: Event,
    pub missing: Vec<EventField>,
}

impl ExtractedEvent {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn is_missing(&self, field: EventField) -> bool {
        self.missing.contains(&field)
    }

    pub fn into_event(self) -> Event {
        self.event
    }
}
