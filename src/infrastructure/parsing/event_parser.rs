//! Profile-driven event extraction
//!
//! One generic extractor for every site: containers are found with the
//! profile's container matcher, then each field is located inside its own
//! container only, so a lookup costs the size of one listing rather than the
//! whole page.

use tracing::debug;

use super::document::Document;
use super::profile::{ExtractionProfile, FieldRule, Locator, Step, ValueSource};
use super::text::extract_text;
use super::tree_search::{NodeHandle, find_all, find_first};
use super::DocumentParser;
use crate::domain::{Event, EventField, ExtractedEvent};

/// Extracts one event per container matched by a profile
#[derive(Debug, Clone, Copy, Default)]
pub struct EventExtractor;

impl EventExtractor {
    /// Events in document order, each with its list of unlocatable fields
    pub fn extract(&self, document: &Document, profile: &ExtractionProfile) -> Vec<ExtractedEvent> {
        let containers = find_all(document.root(), &profile.container);
        debug!(
            "Found {} event containers using profile '{}'",
            containers.len(),
            profile.name
        );

        containers
            .into_iter()
            .enumerate()
            .map(|(index, container)| {
                let extracted = extract_from_container(container, profile);
                if !extracted.is_complete() {
                    debug!(
                        "Listing {} of profile '{}' is missing fields: {:?}",
                        index, profile.name, extracted.missing
                    );
                }
                extracted
            })
            .collect()
    }
}

impl DocumentParser for EventExtractor {
    type Output = Vec<Event>;
    type Config = ExtractionProfile;

    fn parse(&self, document: &Document, profile: &Self::Config) -> Self::Output {
        self.extract(document, profile)
            .into_iter()
            .map(ExtractedEvent::into_event)
            .collect()
    }
}

/// Parse `html` and extract its events with `profile`
pub fn parse_events(html: &str, profile: &ExtractionProfile) -> Vec<Event> {
    EventExtractor.parse(&Document::parse(html), profile)
}

/// Like [`parse_events`], also reporting which fields could not be located
pub fn parse_events_detailed(html: &str, profile: &ExtractionProfile) -> Vec<ExtractedEvent> {
    EventExtractor.extract(&Document::parse(html), profile)
}

fn extract_from_container(container: NodeHandle<'_>, profile: &ExtractionProfile) -> ExtractedEvent {
    let mut missing = Vec::new();
    let mut field_value = |field: EventField, rule: &FieldRule| {
        locate_value(container, rule).unwrap_or_else(|| {
            missing.push(field);
            String::new()
        })
    };

    let date = field_value(EventField::Date, &profile.date);
    let title = field_value(EventField::Title, &profile.title);
    let description = field_value(EventField::Description, &profile.description);

    ExtractedEvent {
        event: Event {
            venue: profile.venue.clone(),
            date,
            title,
            description,
        },
        missing,
    }
}

/// Value of the first locator that reaches a node carrying the value
fn locate_value(container: NodeHandle<'_>, rule: &FieldRule) -> Option<String> {
    rule.locators
        .iter()
        .filter_map(|locator| locate_node(container, locator))
        .find_map(|node| read_value(node, &rule.value))
}

fn locate_node<'a>(container: NodeHandle<'a>, locator: &Locator) -> Option<NodeHandle<'a>> {
    match locator {
        Locator::Search { matcher } => find_first(container, matcher),
        Locator::Path { steps } => follow_path(container, steps),
    }
}

/// Walk a structural path, stopping at the first missing node
fn follow_path<'a>(start: NodeHandle<'a>, steps: &[Step]) -> Option<NodeHandle<'a>> {
    steps.iter().try_fold(start, |node, step| match step {
        Step::FirstChild => node.first_child(),
        Step::NextSibling => node.next_sibling(),
    })
}

fn read_value(node: NodeHandle<'_>, source: &ValueSource) -> Option<String> {
    match source {
        ValueSource::Text => Some(extract_text(node)),
        ValueSource::Attribute { name } => node
            .value()
            .as_element()
            .and_then(|element| element.attr(name))
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::NodeMatcher;

    #[test]
    fn test_follow_path_short_circuits() {
        let document = Document::parse("<div id=\"event-1\"><span>only child</span></div>");
        let container = find_first(document.root(), &NodeMatcher::tag("div")).unwrap();

        let span = follow_path(container, &[Step::FirstChild]).unwrap();
        assert_eq!(span.value().as_element().unwrap().name(), "span");

        assert!(follow_path(container, &[Step::FirstChild, Step::NextSibling]).is_none());
        assert!(
            follow_path(
                container,
                &[Step::FirstChild, Step::FirstChild, Step::FirstChild, Step::FirstChild]
            )
            .is_none()
        );
    }

    #[test]
    fn test_attribute_missing_falls_through_to_next_locator() {
        let document = Document::parse(
            r#"<div class="box"><time>no attribute</time><span data-when="2024-06-01"></span></div>"#,
        );
        let container = find_first(document.root(), &NodeMatcher::tag("div")).unwrap();
        let rule = FieldRule::new(
            vec![
                Locator::search(NodeMatcher::tag("time")),
                Locator::path(&[Step::FirstChild, Step::NextSibling]),
            ],
            ValueSource::attribute("data-when"),
        );

        assert_eq!(locate_value(container, &rule).as_deref(), Some("2024-06-01"));
    }

    #[test]
    fn test_located_but_empty_text_is_not_missing() {
        let html = r#"<div class="layout--pmktermin"><div class="field--name-field-titel">   </div></div>"#;
        let events = parse_events_detailed(html, &ExtractionProfile::pmk());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event.title, "");
        assert!(!events[0].is_missing(EventField::Title));
        assert!(events[0].is_missing(EventField::Date));
        assert!(events[0].is_missing(EventField::Description));
    }

    #[test]
    fn test_venue_comes_from_profile() {
        let html = r#"<div class="layout--pmktermin"></div>"#;
        let events = parse_events(html, &ExtractionProfile::pmk());
        assert_eq!(events[0].venue, "PMK");
    }

    #[test]
    fn test_nested_containers_each_yield_an_event() {
        let html = r#"
            <div class="layout--pmktermin outer">
                <div class="field--name-field-titel">Outer</div>
                <div class="layout--pmktermin inner">
                    <div class="field--name-field-titel">Inner</div>
                </div>
            </div>"#;
        let titles: Vec<String> = parse_events(html, &ExtractionProfile::pmk())
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Outer", "Inner"]);
    }
}
