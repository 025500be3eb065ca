//! Whitespace-normalized text extraction

use scraper::Node;

use super::tree_search::NodeHandle;

/// Concatenate the text under `node`.
///
/// Text nodes contribute their raw payload; elements contribute their
/// children's text, each piece separated by a single space. Any other node
/// kind (document, comment, doctype) yields an empty string. The joined
/// result has every whitespace run collapsed to one space and is trimmed,
/// once per call, so nesting depth never changes the spacing.
pub fn extract_text(node: NodeHandle<'_>) -> String {
    match node.value() {
        Node::Text(_) | Node::Element(_) => {}
        _ => return String::new(),
    }

    let mut raw = String::new();
    for text in node.descendants().filter_map(|n| n.value().as_text()) {
        raw.push(' ');
        raw.push_str(text);
    }

    normalize_whitespace(&raw)
}

/// Collapse whitespace runs (spaces, tabs, newlines) to single spaces and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
