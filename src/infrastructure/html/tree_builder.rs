// ============================================================
// HTML TREE BUILDER
// ============================================================
// Parse HTML with scraper and copy it into the domain tree

use scraper::{ElementRef, Html, Node};

use crate::domain::html::{HtmlDocument, HtmlNode};

/// Build a document tree from an HTML string.
///
/// Input that starts with a doctype or an `<html>` tag is parsed as a full
/// document and keeps its `html` element as the single top-level node.
/// Anything else is parsed as a body fragment, so no `html`/`head`/`body`
/// wrappers are introduced.
pub fn build_tree(source: &str) -> HtmlDocument {
    if is_full_document(source) {
        let parsed = Html::parse_document(source);
        let root = parsed.root_element();
        HtmlDocument::new(vec![HtmlNode::element(
            root.value().name(),
            convert_children(root),
        )])
    } else {
        let parsed = Html::parse_fragment(source);
        HtmlDocument::new(convert_children(parsed.root_element()))
    }
}

fn is_full_document(source: &str) -> bool {
    let head: String = source
        .trim_start()
        .chars()
        .take(9)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html")
}

fn convert_children(parent: ElementRef<'_>) -> Vec<HtmlNode> {
    parent
        .children()
        .filter_map(|child| match child.value() {
            Node::Element(element) => ElementRef::wrap(child)
                .map(|el| HtmlNode::element(element.name(), convert_children(el))),
            Node::Text(text) => Some(HtmlNode::text(&**text)),
            _ => None,
        })
        .collect()
}
