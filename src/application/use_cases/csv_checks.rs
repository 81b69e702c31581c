use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use crate::domain::error::{AppError, Result};
use crate::infrastructure::csv::CsvParser;

/// Every data row must have as many cells as the header.
pub fn check_csv_for_malformed_rows(parser: &CsvParser, path: &Path) -> Result<()> {
    let rows = parser.read_rows(path)?;
    let Some(header) = rows.first() else {
        return Ok(());
    };

    for (idx, row) in rows.iter().enumerate().skip(1) {
        if row.len() != header.len() {
            return Err(AppError::ValidationError(format!(
                "Line {} of {} has {} cells, header has {}",
                idx + 1,
                path.display(),
                row.len(),
                header.len()
            )));
        }
    }

    debug!("{}: {} rows are well-formed", path.display(), rows.len());
    Ok(())
}

/// Values of `column` must be unique.
pub fn check_csv_for_repetitions_in_column(
    parser: &CsvParser,
    path: &Path,
    column: &str,
) -> Result<()> {
    let values = parser.read_column(path, column)?;
    let mut seen = HashSet::with_capacity(values.len());
    for value in &values {
        if !seen.insert(value.as_str()) {
            return Err(AppError::ValidationError(format!(
                "Value <{}> is repeated in column <{}> of {}",
                value,
                column,
                path.display()
            )));
        }
    }
    Ok(())
}

/// Whether two CSV files hold the same rows in the same order.
pub fn compare_csv_files(parser: &CsvParser, output: &Path, gold: &Path) -> Result<bool> {
    let actual = parser.read_rows(output)?;
    let expected = parser.read_rows(gold)?;

    if actual.len() != expected.len() {
        info!(
            "{} has {} rows, {} has {}",
            output.display(),
            actual.len(),
            gold.display(),
            expected.len()
        );
        return Ok(false);
    }

    match actual.iter().zip(&expected).position(|(a, e)| a != e) {
        Some(idx) => {
            info!(
                "{} and {} differ at line {}",
                output.display(),
                gold.display(),
                idx + 1
            );
            Ok(false)
        }
        None => Ok(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_malformed_row_is_named_by_line() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let bad = dir.path().join("bad.csv");
        fs::write(&good, "a,b\n1,2\n3,4\n").unwrap();
        fs::write(&bad, "a,b\n1,2\n3\n").unwrap();

        let parser = CsvParser::new();
        assert!(check_csv_for_malformed_rows(&parser, &good).is_ok());
        let err = check_csv_for_malformed_rows(&parser, &bad).unwrap_err();
        assert!(err.message().starts_with("Line 3 "));
    }

    #[test]
    fn test_repetitions_in_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rep.csv");
        fs::write(&path, "id,en\n1,x\n2,y\n3,x\n").unwrap();

        let parser = CsvParser::new();
        assert!(check_csv_for_repetitions_in_column(&parser, &path, "id").is_ok());
        let err = check_csv_for_repetitions_in_column(&parser, &path, "en").unwrap_err();
        assert!(err.message().contains("<x>"));
        assert!(matches!(
            check_csv_for_repetitions_in_column(&parser, &path, "de"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_compare_csv_files() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        let c = dir.path().join("c.csv");
        fs::write(&a, "id,en\n1,x\n").unwrap();
        fs::write(&b, "\u{feff}id,en\r\n1,x\r\n").unwrap();
        fs::write(&c, "id,en\n1,y\n").unwrap();

        let parser = CsvParser::new();
        assert!(compare_csv_files(&parser, &a, &b).unwrap());
        assert!(!compare_csv_files(&parser, &a, &c).unwrap());
    }
}
