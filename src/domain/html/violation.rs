use std::fmt;

use crate::domain::error::AppError;

/// Which rule rejected a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationRule {
    DisallowedTag,
    RootText,
    InvalidEntity,
    UnescapedAmpersand,
    ListStructure,
    ListItemParent,
    EmptyParagraph,
    NestedParagraph,
    UnescapedLessThan,
    UnclosedTag,
}

/// First violation found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlViolation {
    pub rule: ViolationRule,
    pub detail: String,
}

impl HtmlViolation {
    pub fn new(rule: ViolationRule, detail: impl Into<String>) -> Self {
        Self {
            rule,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for HtmlViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

impl std::error::Error for HtmlViolation {}

impl From<HtmlViolation> for AppError {
    fn from(violation: HtmlViolation) -> Self {
        AppError::ParseError(violation.detail)
    }
}

/// At most `max_chars` characters of `text`, with `...` appended.
// The suffix is part of the message format and is added even when nothing was cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    format!("{}...", head)
}
