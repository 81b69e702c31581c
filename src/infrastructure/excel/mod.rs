// ============================================================
// EXCEL INFRASTRUCTURE LAYER
// ============================================================
// Read XLS/XLSX/ODS sheets as rows of strings and export them to CSV

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Reader};
use tracing::{debug, info};

use crate::domain::csv::Row;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::CsvWriter;

#[derive(Debug, Clone, Default)]
pub struct ExcelReader;

impl ExcelReader {
    pub fn new() -> Self {
        Self
    }

    /// Rows of a sheet (the first sheet when `sheet_name` is `None`).
    pub fn read_sheet(&self, path: &Path, sheet_name: Option<&str>) -> Result<Vec<Row>> {
        if !path.exists() {
            return Err(AppError::NotFound(format!("File {} not found", path.display())));
        }

        let mut workbook = open_workbook_auto(path)?;
        let sheet_names = workbook.sheet_names();

        let name = match sheet_name {
            Some(name) if sheet_names.iter().any(|s| s == name) => name.to_string(),
            Some(name) => {
                return Err(AppError::NotFound(format!(
                    "Sheet <{}> not found in {}. Available sheets: {}",
                    name,
                    path.display(),
                    sheet_names.join(", ")
                )))
            }
            None => sheet_names.first().cloned().ok_or_else(|| {
                AppError::NotFound(format!("No worksheet found in {}", path.display()))
            })?,
        };

        let range = workbook.worksheet_range(&name)?;
        let rows: Vec<Row> = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        debug!("Read {} rows from sheet <{}> of {}", rows.len(), name, path.display());
        Ok(rows)
    }
}

fn cell_to_string(cell: &Data) -> String {
    cell.as_string().unwrap_or_else(|| cell.to_string())
}

/// Export one sheet of a spreadsheet to a CSV file.
pub fn convert_excel_to_csv(
    input: &Path,
    sheet_name: Option<&str>,
    output: &Path,
    delimiter: u8,
    overwrite: bool,
) -> Result<()> {
    let rows = ExcelReader::new().read_sheet(input, sheet_name)?;
    CsvWriter::new()
        .with_delimiter(delimiter)
        .write_rows(&rows, output, overwrite)?;
    info!("Converted {} into {}", input.display(), output.display());
    Ok(())
}
