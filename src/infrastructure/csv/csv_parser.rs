// ============================================================
// CSV PARSER
// ============================================================
// Read CSV files with encoding detection and error handling

use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::domain::csv::{CsvTable, Row, RowMap, CANDIDATE_DELIMITERS};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::text::read_decoded;

/// CSV reader with encoding detection
#[derive(Debug, Clone)]
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: false,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Every record of a file, header row included
    pub fn read_rows(&self, path: &Path) -> Result<Vec<Row>> {
        let content = Self::read_content(path)?;
        self.parse_rows(&content)
            .map_err(|e| Self::with_path(e, path))
    }

    /// Header and data rows of a file
    pub fn read_table(&self, path: &Path) -> Result<CsvTable> {
        let mut rows = self.read_rows(path)?.into_iter();
        let headers = rows.next().ok_or_else(|| {
            AppError::ParseError(format!("File {} has no header row", path.display()))
        })?;
        Ok(CsvTable {
            headers,
            rows: rows.collect(),
        })
    }

    /// Data rows keyed by header
    pub fn read_dicts(&self, path: &Path) -> Result<Vec<RowMap>> {
        Ok(self.read_table(path)?.to_dicts())
    }

    /// Values of one column, in row order
    pub fn read_column(&self, path: &Path, column: &str) -> Result<Vec<String>> {
        let table = self.read_table(path)?;
        let idx = Self::require_column(&table, column, path)?;
        Ok(table
            .rows
            .iter()
            .map(|row| row.get(idx).cloned().unwrap_or_default())
            .collect())
    }

    /// Mapping from one column to another. Keys must be unique.
    pub fn read_dict_from_two_columns(
        &self,
        path: &Path,
        key_column: &str,
        value_column: &str,
    ) -> Result<HashMap<String, String>> {
        let table = self.read_table(path)?;
        let key_idx = Self::require_column(&table, key_column, path)?;
        let value_idx = Self::require_column(&table, value_column, path)?;

        let mut map = HashMap::with_capacity(table.rows.len());
        for row in &table.rows {
            let key = row.get(key_idx).cloned().unwrap_or_default();
            let value = row.get(value_idx).cloned().unwrap_or_default();
            if map.contains_key(&key) {
                return Err(AppError::ValidationError(format!(
                    "Value <{}> is repeated in column <{}> of {}",
                    key,
                    key_column,
                    path.display()
                )));
            }
            map.insert(key, value);
        }
        Ok(map)
    }

    /// Parse CSV content from string
    pub fn parse_rows(&self, content: &str) -> Result<Vec<Row>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .trim(if self.trim { Trim::All } else { Trim::None })
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(rows)
    }

    /// Parser for a file whose delimiter is guessed from its first lines
    pub fn auto_detect(path: &Path) -> Result<Self> {
        let content = Self::read_content(path)?;
        Ok(Self::default().with_delimiter(Self::detect_delimiter(&content)))
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let sample_lines: Vec<_> = content.lines().take(10).collect();

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        if sample_lines.is_empty() {
            return best_delimiter;
        }

        for &delimiter in &CANDIDATE_DELIMITERS {
            let field_counts: Vec<usize> = sample_lines
                .iter()
                .map(|line| line.bytes().filter(|&b| b == delimiter).count())
                .collect();

            // Score by consistency (low standard deviation) and frequency
            let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
            let variance = field_counts
                .iter()
                .map(|&x| (x as f32 - avg).powi(2))
                .sum::<f32>()
                / field_counts.len() as f32;

            let score = avg / (1.0 + variance.sqrt());

            if score > best_score {
                best_score = score;
                best_delimiter = delimiter;
            }
        }

        best_delimiter
    }

    fn read_content(path: &Path) -> Result<String> {
        let (content, _) = read_decoded(path)?;
        Ok(content)
    }

    fn require_column(table: &CsvTable, column: &str, path: &Path) -> Result<usize> {
        table.column_index(column).ok_or_else(|| {
            AppError::NotFound(format!(
                "Column <{}> not found in {}",
                column,
                path.display()
            ))
        })
    }

    fn with_path(err: AppError, path: &Path) -> AppError {
        match err {
            AppError::ParseError(msg) => {
                AppError::ParseError(format!("{} (file {})", msg, path.display()))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let rows = CsvParser::new().parse_rows(content).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["Alice", "30", "NYC"]);
    }

    #[test]
    fn test_quoted_fields_and_trim() {
        let content = "a,b\n\" x, y \",\"say \"\"hi\"\"\"";
        let rows = CsvParser::new().parse_rows(content).unwrap();
        assert_eq!(rows[1], vec![" x, y ", "say \"hi\""]);

        let trimmed = CsvParser::new().with_trim(true).parse_rows(content).unwrap();
        assert_eq!(trimmed[1][0], "x, y");
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvParser::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvParser::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvParser::detect_delimiter("a\tb\nc\td"), b'\t');
        assert_eq!(CsvParser::detect_delimiter(""), b',');
    }

    #[test]
    fn test_read_table_dicts_and_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("langs.csv");
        fs::write(&path, "id,en\n1,foo\n2,bar\n").unwrap();

        let parser = CsvParser::new();
        let table = parser.read_table(&path).unwrap();
        assert_eq!(table.headers, vec!["id", "en"]);
        assert_eq!(table.rows.len(), 2);

        let dicts = parser.read_dicts(&path).unwrap();
        assert_eq!(dicts[1]["en"], "bar");

        assert_eq!(parser.read_column(&path, "en").unwrap(), vec!["foo", "bar"]);
        assert!(matches!(
            parser.read_column(&path, "ru"),
            Err(AppError::NotFound(_))
        ));

        let map = parser.read_dict_from_two_columns(&path, "id", "en").unwrap();
        assert_eq!(map["2"], "bar");
    }

    #[test]
    fn test_duplicate_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dup.csv");
        fs::write(&path, "id,en\n1,foo\n1,bar\n").unwrap();

        let err = CsvParser::new()
            .read_dict_from_two_columns(&path, "id", "en")
            .unwrap_err();
        assert!(err.message().contains("<1>"));
    }

    #[test]
    fn test_auto_detect_semicolon_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("semi.csv");
        fs::write(&path, "id;en\n1;foo\n").unwrap();

        let parser = CsvParser::auto_detect(&path).unwrap();
        assert_eq!(parser.delimiter(), b';');
        assert_eq!(parser.read_rows(&path).unwrap()[1], vec!["1", "foo"]);
    }

    #[test]
    fn test_windows_1251_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ansi.csv");
        // "id,ru\n1,мир" with the Cyrillic word in cp1251
        let mut bytes = b"id,ru\n1,".to_vec();
        bytes.extend_from_slice(&[0xEC, 0xE8, 0xF0]);
        fs::write(&path, bytes).unwrap();

        let column = CsvParser::new().read_column(&path, "ru").unwrap();
        assert_eq!(column, vec!["мир"]);
    }
}
