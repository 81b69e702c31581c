// ============================================================
// HTML DOCUMENT TREE
// ============================================================
// Read-only element/text tree the validator walks

/// A node of a parsed HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element { name: String, children: Vec<HtmlNode> },
    Text { content: String },
}

impl HtmlNode {
    pub fn element(name: impl Into<String>, children: Vec<HtmlNode>) -> Self {
        HtmlNode::Element {
            name: name.into(),
            children,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        HtmlNode::Text {
            content: content.into(),
        }
    }

    /// Tag name for elements, `None` for text.
    pub fn name(&self) -> Option<&str> {
        match self {
            HtmlNode::Element { name, .. } => Some(name),
            HtmlNode::Text { .. } => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            HtmlNode::Text { content } => out.push_str(content),
            HtmlNode::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Generic containers that act as the document root when a fragment is wrapped in one.
pub const CONTAINER_ELEMENTS: &[&str] = &[
    "html", "body", "div", "section", "article", "main", "header", "footer", "aside", "nav",
];

/// Where the document root sits in a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    /// The fragment is a single container element, which is the document root.
    Wrapper,
    /// Top-level nodes hang off an implicit root.
    Implicit,
}

/// Parsed HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    top_level: Vec<HtmlNode>,
}

impl HtmlDocument {
    pub fn new(top_level: Vec<HtmlNode>) -> Self {
        Self { top_level }
    }

    /// Top-level nodes in document order.
    pub fn top_level(&self) -> &[HtmlNode] {
        &self.top_level
    }
}
