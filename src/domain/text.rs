use std::fmt;

/// Encodings text files in this project come in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// UTF-8, with a leading BOM stripped when present
    Utf8,
    /// Legacy Cyrillic ANSI code page
    Windows1251,
}

impl TextEncoding {
    pub fn encoding(self) -> &'static encoding_rs::Encoding {
        match self {
            TextEncoding::Utf8 => encoding_rs::UTF_8,
            TextEncoding::Windows1251 => encoding_rs::WINDOWS_1251,
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => write!(f, "utf-8"),
            TextEncoding::Windows1251 => write!(f, "cp1251"),
        }
    }
}

/// Content accepted by `write_plain_text_to_file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextContent {
    Text(String),
    Lines(Vec<String>),
}

impl From<&str> for TextContent {
    fn from(value: &str) -> Self {
        TextContent::Text(value.to_string())
    }
}

impl From<String> for TextContent {
    fn from(value: String) -> Self {
        TextContent::Text(value)
    }
}

impl From<Vec<String>> for TextContent {
    fn from(value: Vec<String>) -> Self {
        TextContent::Lines(value)
    }
}

impl From<&[&str]> for TextContent {
    fn from(value: &[&str]) -> Self {
        TextContent::Lines(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Target of `move_line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Insert before this zero-based line
    Before(usize),
    /// Append after the last line
    End,
}
