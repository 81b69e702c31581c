use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Trims the string and collapses every whitespace run inside it into one space.
pub fn remove_extra_space(text: &str) -> String {
    WHITESPACE_RUN_PATTERN
        .replace_all(text.trim(), " ")
        .into_owned()
}
