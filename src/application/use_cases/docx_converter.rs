use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::error::{AppError, Result};
use crate::infrastructure::docx::read_from_doc;

/// Convert one .docx file into `<output_dir>/<stem>.html` and return the written path.
pub fn convert_file_from_doc(path: &Path, output_dir: &Path, print_html: bool) -> Result<PathBuf> {
    let html = read_from_doc(path)?;

    let stem = path.file_stem().ok_or_else(|| {
        AppError::ValidationError(format!("Cannot derive a file name from {}", path.display()))
    })?;
    let mut output_path = output_dir.join(stem);
    output_path.set_extension("html");

    if print_html {
        info!("{}", html);
    }

    fs::create_dir_all(output_dir)?;
    fs::write(&output_path, html)?;
    info!("Converted {} into {}", path.display(), output_path.display());
    Ok(output_path)
}

/// Convert every .docx file of `input_dir`, in file name order.
pub fn convert_all(input_dir: &Path, output_dir: &Path, print_html: bool) -> Result<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(AppError::NotFound(format!(
            "Directory {} not found",
            input_dir.display()
        )));
    }

    let mut sources: Vec<PathBuf> = fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_docx(path))
        .collect();
    sources.sort();

    let mut written = Vec::with_capacity(sources.len());
    for source in &sources {
        info!(
            "Converting {}",
            source.file_name().unwrap_or_default().to_string_lossy()
        );
        written.push(convert_file_from_doc(source, output_dir, print_html)?);
    }
    Ok(written)
}

fn is_docx(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}
