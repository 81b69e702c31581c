// ============================================================
// TABULAR DOMAIN LAYER
// ============================================================
// Row types shared by the CSV and Excel helpers

use std::collections::HashMap;

/// One record as plain cells.
pub type Row = Vec<String>;

/// One record keyed by header name.
pub type RowMap = HashMap<String, String>;

/// Header plus data rows of a delimited file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl CsvTable {
    /// Position of a header, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Rows keyed by header. Missing trailing cells become empty strings.
    pub fn to_dicts(&self) -> Vec<RowMap> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .enumerate()
                    .map(|(idx, header)| {
                        (header.clone(), row.get(idx).cloned().unwrap_or_default())
                    })
                    .collect()
            })
            .collect()
    }
}

/// Delimiters recognised by delimiter detection.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Parse a user-facing delimiter such as `","`, `";"` or `"\t"`.
pub fn delimiter_from_str(value: &str) -> Option<u8> {
    match value {
        "\\t" | "tab" | "\t" => Some(b'\t'),
        other => {
            let mut bytes = other.bytes();
            match (bytes.next(), bytes.next()) {
                (Some(b), None) if b.is_ascii() => Some(b),
                _ => None,
            }
        }
    }
}
