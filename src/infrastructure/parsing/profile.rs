//! Extraction profiles
//!
//! A profile describes one site's markup shape as data: how to recognise the
//! container of a single listing, and for every event field an ordered list of
//! ways to reach the field's node from that container. A single generic
//! extractor interprets any profile, so supporting another site means adding
//! another profile value rather than another code path.

use std::collections::BTreeMap;

use scraper::Node;
use serde::{Deserialize, Serialize};

use super::error::{ScrapeError, ScrapeResult};
use super::tree_search::NodePredicate;
use crate::domain::EventField;

/// Attribute condition of a [`NodeMatcher`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeMatch {
    pub name: String,
    /// Substring the attribute value must contain; `None` only requires presence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<String>,
}

/// Declarative element predicate
///
/// Matches elements whose tag is one of `tags` (any tag when empty) and that
/// satisfy the optional attribute condition. Text and other node kinds never
/// match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeMatcher {
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<AttributeMatch>,
}

impl NodeMatcher {
    /// Elements with the given tag
    pub fn tag(tag: &str) -> Self {
        Self {
            tags: vec![tag.to_string()],
            attribute: None,
        }
    }

    /// Elements with any of the given tags
    pub fn any_of(tags: &[&str]) -> Self {
        Self {
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            attribute: None,
        }
    }

    /// Any element
    pub fn element() -> Self {
        Self::default()
    }

    /// Require the attribute to be present
    #[must_use]
    pub fn with_attribute(mut self, name: &str) -> Self {
        self.attribute = Some(AttributeMatch {
            name: name.to_string(),
            contains: None,
        });
        self
    }

    /// Require the attribute value to contain `needle`
    #[must_use]
    pub fn with_attribute_containing(mut self, name: &str, needle: &str) -> Self {
        self.attribute = Some(AttributeMatch {
            name: name.to_string(),
            contains: Some(needle.to_string()),
        });
        self
    }

    /// Whether this matcher accepts every element
    pub fn is_unconstrained(&self) -> bool {
        self.tags.is_empty() && self.attribute.is_none()
    }
}

impl NodePredicate for NodeMatcher {
    fn matches(&self, node: &Node) -> bool {
        let Some(element) = node.as_element() else {
            return false;
        };

        if !self.tags.is_empty()
            && !self
                .tags
                .iter()
                .any(|tag| tag.eq_ignore_ascii_case(element.name()))
        {
            return false;
        }

        match &self.attribute {
            None => true,
            Some(AttributeMatch { name, contains }) => match element.attr(name) {
                None => false,
                Some(value) => contains
                    .as_deref()
                    .is_none_or(|needle| value.contains(needle)),
            },
        }
    }
}

/// One move of a structural path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    FirstChild,
    NextSibling,
}

/// How to reach a field's node from its container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Locator {
    /// First match in the container's subtree (the container included)
    Search { matcher: NodeMatcher },
    /// Fixed chain of child/sibling moves; any missing node ends the chain
    Path { steps: Vec<Step> },
}

impl Locator {
    pub const fn search(matcher: NodeMatcher) -> Self {
        Self::Search { matcher }
    }

    pub fn path(steps: &[Step]) -> Self {
        Self::Path {
            steps: steps.to_vec(),
        }
    }
}

/// Where a field's final string comes from once its node is located
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum ValueSource {
    /// Normalized text under the node
    Text,
    /// Value of an attribute; a node without it counts as not found
    Attribute { name: String },
}

impl ValueSource {
    pub fn attribute(name: &str) -> Self {
        Self::Attribute {
            name: name.to_string(),
        }
    }
}

/// Locators tried in order plus the value rule for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub locators: Vec<Locator>,
    pub value: ValueSource,
}

impl FieldRule {
    pub const fn new(locators: Vec<Locator>, value: ValueSource) -> Self {
        Self { locators, value }
    }

    /// Text of the first node matching `matcher`
    pub fn text_of(matcher: NodeMatcher) -> Self {
        Self::new(vec![Locator::search(matcher)], ValueSource::Text)
    }

    /// Attribute of the first node matching `matcher`
    pub fn attribute_of(matcher: NodeMatcher, attribute: &str) -> Self {
        Self::new(
            vec![Locator::search(matcher)],
            ValueSource::attribute(attribute),
        )
    }

    /// Append a structural path tried after the existing locators
    #[must_use]
    pub fn or_path(mut self, steps: &[Step]) -> Self {
        self.locators.push(Locator::path(steps));
        self
    }
}

/// Extraction rules for one site's markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionProfile {
    /// Site identifier used to select the profile
    pub name: String,
    /// Copied into every extracted event
    pub venue: String,
    /// Identifies the root node of one listing
    pub container: NodeMatcher,
    pub date: FieldRule,
    pub title: FieldRule,
    pub description: FieldRule,
}

impl ExtractionProfile {
    /// Programme listings of the PMK (`www.pmk.or.at/termine`)
    pub fn pmk() -> Self {
        Self {
            name: "pmk".to_string(),
            venue: "PMK".to_string(),
            container: NodeMatcher::tag("div").with_attribute_containing("class", "layout--pmktermin"),
            date: FieldRule::attribute_of(NodeMatcher::tag("time").with_attribute("datetime"), "datetime"),
            title: FieldRule::text_of(
                NodeMatcher::tag("div").with_attribute_containing("class", "field--name-field-titel"),
            ),
            description: FieldRule::text_of(
                NodeMatcher::tag("div").with_attribute_containing("class", "field--type-text-with-summary"),
            ),
        }
    }

    /// Programme listings of the Treibhaus (`treibhaus.at/programm`)
    ///
    /// The structural paths mirror the nesting the listing markup is known to
    /// use. The searches in front of them (any element carrying `content`, the
    /// first `h1`..`h4`, the first `p`) are a best guess at that markup, not
    /// observed selectors: a stray paragraph anywhere in the listing wins over
    /// the description path. Drop a search from the rule if it misfires on a
    /// real page.
    pub fn treibhaus() -> Self {
        use Step::{FirstChild, NextSibling};

        Self {
            name: "treibhaus".to_string(),
            venue: "Treibhaus".to_string(),
            container: NodeMatcher::tag("div").with_attribute_containing("id", "event-"),
            date: FieldRule::attribute_of(NodeMatcher::element().with_attribute("content"), "content")
                .or_path(&[FirstChild; 6]),
            title: FieldRule::text_of(NodeMatcher::any_of(&["h1", "h2", "h3", "h4"])).or_path(&[
                FirstChild,
                FirstChild,
                NextSibling,
                FirstChild,
                FirstChild,
                FirstChild,
            ]),
            description: FieldRule::text_of(NodeMatcher::tag("p")).or_path(&[
                FirstChild,
                FirstChild,
                NextSibling,
                FirstChild,
                NextSibling,
                FirstChild,
                FirstChild,
            ]),
        }
    }

    pub const fn rule(&self, field: EventField) -> &FieldRule {
        match field {
            EventField::Date => &self.date,
            EventField::Title => &self.title,
            EventField::Description => &self.description,
        }
    }

    /// Field rules in extraction order
    pub fn field_rules(&self) -> [(EventField, &FieldRule); 3] {
        EventField::ALL.map(|field| (field, self.rule(field)))
    }

    /// Reject profiles that cannot locate anything meaningful
    pub fn validate(&self) -> ScrapeResult<()> {
        if self.name.trim().is_empty() {
            return Err(ScrapeError::invalid_profile(&self.name, "profile name is empty"));
        }

        if self.container.is_unconstrained() {
            return Err(ScrapeError::invalid_profile(
                &self.name,
                "container matcher accepts every element",
            ));
        }

        for (field, rule) in self.field_rules() {
            if rule.locators.is_empty() {
                return Err(ScrapeError::invalid_profile(
                    &self.name,
                    format!("field '{field}' has no locators"),
                ));
            }

            if rule
                .locators
                .iter()
                .any(|locator| matches!(locator, Locator::Path { steps } if steps.is_empty()))
            {
                return Err(ScrapeError::invalid_profile(
                    &self.name,
                    format!("field '{field}' has an empty structural path"),
                ));
            }

            if let ValueSource::Attribute { name } = &rule.value {
                if name.trim().is_empty() {
                    return Err(ScrapeError::invalid_profile(
                        &self.name,
                        format!("field '{field}' reads an unnamed attribute"),
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Profiles selectable by site identifier
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, ExtractionProfile>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in `pmk` and `treibhaus` profiles
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        for profile in [ExtractionProfile::pmk(), ExtractionProfile::treibhaus()] {
            profiles.insert(profile.name.clone(), profile);
        }
        Self { profiles }
    }

    /// Add or replace a profile after validating it
    pub fn register(&mut self, profile: ExtractionProfile) -> ScrapeResult<()> {
        profile.validate()?;
        self.profiles.insert(profile.name.clone(), profile);
        Ok(())
    }

    pub fn get(&self, name: &str) -> ScrapeResult<&ExtractionProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ScrapeError::unknown_profile(name, self.names()))
    }

    pub fn names(&self) -> Vec<String> {
        self.profiles.keys().cloned().collect()
    }
}
