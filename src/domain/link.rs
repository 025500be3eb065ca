use serde::{Deserialize, Serialize};
use url::Url;

/// A hyperlink found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Raw `href` attribute value, empty when the anchor has none
    pub href: String,
    /// Normalized text of every text node under the anchor
    pub text: String,
}

impl Link {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }

    /// Resolve the raw href against the page it was found on.
    ///
    /// Returns `None` for an empty href or one the `url` crate rejects.
    pub fn resolve(&self, base: &Url) -> Option<Url> {
        if self.href.trim().is_empty() {
            return None;
        }
        base.join(self.href.trim()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_resolution() {
        let base = Url::parse("https://www.pmk.or.at/termine").unwrap();

        let link = Link::new("/termin/42", "Konzert");
        assert_eq!(
            link.resolve(&base).unwrap().as_str(),
            "https://www.pmk.or.at/termin/42"
        );

        let absolute = Link::new("https://other.example/x", "x");
        assert_eq!(absolute.resolve(&base).unwrap().as_str(), "https://other.example/x");

        let relative = Link::new("programm?page=2", "next");
        assert_eq!(
            relative.resolve(&base).unwrap().as_str(),
            "https://www.pmk.or.at/programm?page=2"
        );
    }

    #[test]
    fn test_empty_href_does_not_resolve() {
        let base = Url::parse("https://treibhaus.at/programm").unwrap();
        assert!(Link::new("", "no target").resolve(&base).is_none());
        assert!(Link::new("   ", "blank").resolve(&base).is_none());
    }
}
