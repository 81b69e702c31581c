// ============================================================
// CSV WRITER
// ============================================================
// Write rows or header-keyed records to a UTF-8 CSV file

use std::path::Path;

use csv::WriterBuilder;
use tracing::info;

use crate::domain::csv::RowMap;
use crate::domain::error::{AppError, Result};

#[derive(Debug, Clone)]
pub struct CsvWriter {
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Write plain rows. Rows may differ in length.
    pub fn write_rows<R, C>(&self, rows: &[R], path: &Path, overwrite: bool) -> Result<()>
    where
        R: AsRef<[C]>,
        C: AsRef<str>,
    {
        Self::ensure_writable(path, overwrite)?;

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_path(path)?;
        for row in rows {
            writer.write_record(row.as_ref().iter().map(|cell| cell.as_ref()))?;
        }
        writer.flush()?;

        info!("Written {} rows into file {}.", rows.len(), path.display());
        Ok(())
    }

    /// Write a header line followed by one line per record, in `headers` order.
    pub fn write_dicts(
        &self,
        rows: &[RowMap],
        headers: &[String],
        path: &Path,
        overwrite: bool,
    ) -> Result<()> {
        let mut table: Vec<Vec<&str>> = Vec::with_capacity(rows.len() + 1);
        table.push(headers.iter().map(String::as_str).collect());
        for row in rows {
            table.push(
                headers
                    .iter()
                    .map(|h| row.get(h).map_or("", String::as_str))
                    .collect(),
            );
        }
        self.write_rows(&table, path, overwrite)
    }

    fn ensure_writable(path: &Path, overwrite: bool) -> Result<()> {
        if !overwrite && path.exists() {
            return Err(AppError::AlreadyExists(format!(
                "File {} already exists",
                path.display()
            )));
        }
        Ok(())
    }
}
