//! Predicate-driven search over the parsed node tree
//!
//! Both searches walk the subtree rooted at the given node depth-first in
//! pre-order: a node is tested before any of its children, and children are
//! visited left to right, so results always come back in document order.

use std::ops::Deref;

use scraper::{ElementRef, Node};

/// Borrowed handle to one node of a parsed [`Document`](super::Document)
///
/// This is the `ego_tree` node reference of scraper's own tree, named through
/// `ElementRef` so it always matches the tree version scraper was built with.
pub type NodeHandle<'a> = <ElementRef<'a> as Deref>::Target;

/// A pure test over a single node's kind, tag name and attributes
pub trait NodePredicate {
    fn matches(&self, node: &Node) -> bool;
}

impl<F> NodePredicate for F
where
    F: Fn(&Node) -> bool,
{
    fn matches(&self, node: &Node) -> bool {
        self(node)
    }
}

/// Every node under (and including) `root` that satisfies `predicate`.
///
/// A single walk over the whole subtree: the walk keeps descending into a
/// matching node, so a match nested inside another match is reported as well,
/// each node at most once.
pub fn find_all<'a, P>(root: NodeHandle<'a>, predicate: &P) -> Vec<NodeHandle<'a>>
where
    P: NodePredicate + ?Sized,
{
    root.descendants()
        .filter(|node| predicate.matches(node.value()))
        .collect()
}

/// The first node under (and including) `root` that satisfies `predicate`.
///
/// Stops walking as soon as a match is found.
pub fn find_first<'a, P>(root: NodeHandle<'a>, predicate: &P) -> Option<NodeHandle<'a>>
where
    P: NodePredicate + ?Sized,
{
    root.descendants()
        .find(|node| predicate.matches(node.value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::parsing::Document;
    use std::cell::Cell;

    fn is_tag(tag: &'static str) -> impl Fn(&Node) -> bool {
        move |node: &Node| node.as_element().is_some_and(|e| e.name() == tag)
    }

    fn id_of(node: NodeHandle<'_>) -> String {
        node.value()
            .as_element()
            .and_then(|e| e.attr("id"))
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn test_find_all_returns_document_order() {
        let document = Document::parse(
            r#"<div id="a"><span id="b"></span><div id="c"><div id="d"></div></div></div><div id="e"></div>"#,
        );

        let ids: Vec<String> = find_all(document.root(), &is_tag("div"))
            .into_iter()
            .map(id_of)
            .collect();

        assert_eq!(ids, vec!["a", "c", "d", "e"]);
    }

    #[test]
    fn test_find_first_is_preorder() {
        let document = Document::parse(
            r#"<section><div id="outer"><div id="inner"></div></div></section><div id="later"></div>"#,
        );

        let first = find_first(document.root(), &is_tag("div")).unwrap();
        assert_eq!(id_of(first), "outer");
    }

    #[test]
    fn test_find_first_stops_at_first_match() {
        let document = Document::parse("<p>1</p><p>2</p><p>3</p><p>4</p>");
        let visited = Cell::new(0usize);
        let counting = |node: &Node| {
            visited.set(visited.get() + 1);
            node.as_element().is_some_and(|e| e.name() == "p")
        };

        let all = find_all(document.root(), &counting).len();
        let full_walk = visited.replace(0);
        assert_eq!(all, 4);

        assert!(find_first(document.root(), &counting).is_some());
        assert!(visited.get() < full_walk);
    }

    #[test]
    fn test_search_scoped_to_subtree() {
        let document = Document::parse(
            r#"<div id="scope"><b id="inside"></b></div><b id="outside"></b>"#,
        );
        let scope = find_first(document.root(), &|n: &Node| {
            n.as_element().is_some_and(|e| e.attr("id") == Some("scope"))
        })
        .unwrap();

        let found = find_all(scope, &is_tag("b"));
        assert_eq!(found.len(), 1);
        assert_eq!(id_of(found[0]), "inside");
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let document = Document::parse("<p>nothing here</p>");
        assert!(find_all(document.root(), &is_tag("table")).is_empty());
        assert!(find_first(document.root(), &is_tag("table")).is_none());
    }

    #[test]
    fn test_root_itself_is_tested() {
        let document = Document::parse(r#"<div id="only"></div>"#);
        let div = find_first(document.root(), &is_tag("div")).unwrap();
        let again = find_first(div, &is_tag("div")).unwrap();
        assert_eq!(again, div);
    }
}
