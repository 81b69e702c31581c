// ============================================================
// VALIDATION POLICY
// ============================================================
// Allow-list and flags for one validation call

use std::collections::BTreeSet;

/// Tags accepted when the caller does not supply an allow-list.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "p", "ul", "ol", "li", "a", "i", "b", "em", "strong", "u", "sup", "sub",
];

/// What a document may contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Tag names accepted at every level of the tree
    pub allowed_tags: BTreeSet<String>,

    /// Whether non-blank text may sit directly under the document root
    pub allow_root_text: bool,

    /// List, paragraph, `<` and unclosed-tag rules
    pub structure_checks: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            allowed_tags: DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect(),
            allow_root_text: false,
            structure_checks: false,
        }
    }
}

impl ValidationPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default allow-list with every structure rule switched on.
    pub fn strict() -> Self {
        Self::default().with_structure_checks(true)
    }

    /// Replace the allow-list. Names are lower-cased to match parser output.
    pub fn with_allowed_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_tags = tags
            .into_iter()
            .map(|t| t.as_ref().trim().to_ascii_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    pub fn with_root_text(mut self, allowed: bool) -> Self {
        self.allow_root_text = allowed;
        self
    }

    pub fn with_structure_checks(mut self, enabled: bool) -> Self {
        self.structure_checks = enabled;
        self
    }

    pub fn is_allowed(&self, tag: &str) -> bool {
        self.allowed_tags.contains(tag)
    }

    /// `<a>, <b>, ...` listing used in error messages.
    pub fn describe_allowed(&self) -> String {
        self.allowed_tags
            .iter()
            .map(|t| format!("<{}>", t))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
