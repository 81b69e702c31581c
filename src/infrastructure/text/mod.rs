// ============================================================
// PLAIN TEXT FILES
// ============================================================
// Reading, writing and line editing for .txt files

pub mod encoding;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::domain::error::{AppError, Result};
use crate::domain::text::{InsertPosition, TextContent, TextEncoding};

pub use encoding::{decode, detect_encoding, read_decoded};

/// Encoding of a text file: UTF-8 or Windows-1251.
pub fn check_encoding_of_file(path: &Path) -> Result<TextEncoding> {
    encoding::ensure_exists(path)?;
    let bytes = fs::read(path)?;
    Ok(detect_encoding(&bytes))
}

/// Trimmed lines of a text file, blank lines dropped.
pub fn read_non_empty_lines_from_txt_file(path: &Path) -> Result<Vec<String>> {
    let (content, _) = read_decoded(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Whole content of a text file.
pub fn read_plain_text_from_file(path: &Path) -> Result<String> {
    let (content, encoding) = read_decoded(path)?;
    if encoding == TextEncoding::Windows1251 {
        info!(
            "Note: file {} has ANSI encoding",
            path.file_name().map_or_else(
                || path.display().to_string(),
                |n| n.to_string_lossy().into_owned()
            )
        );
    }
    Ok(content)
}

/// Write text to a UTF-8 file.
///
/// `TextContent::Lines` get `newline` appended to every line.
pub fn write_plain_text_to_file(
    content: impl Into<TextContent>,
    path: &Path,
    overwrite: bool,
    newline: &str,
) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(AppError::AlreadyExists(format!(
            "File {} already exists",
            path.display()
        )));
    }

    match content.into() {
        TextContent::Text(text) => {
            fs::write(path, &text)?;
            info!(
                "Written {} characters into file {}.",
                text.chars().count(),
                path.display()
            );
        }
        TextContent::Lines(lines) => {
            let mut buffer = String::new();
            for line in &lines {
                buffer.push_str(line);
                buffer.push_str(newline);
            }
            fs::write(path, buffer)?;
            info!("Written {} lines into file {}.", lines.len(), path.display());
        }
    }
    Ok(())
}

/// Cut one line and insert it before another (zero-based line numbers).
///
/// The result goes to `output` when given, otherwise back into `path`.
pub fn move_line(
    path: &Path,
    line_to_cut: usize,
    insert_at: InsertPosition,
    output: Option<&Path>,
) -> Result<()> {
    encoding::ensure_exists(path)?;
    let content = fs::read_to_string(path)?;
    // Each line keeps its own terminator, so CRLF files stay CRLF.
    let mut lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
    let ends_with_newline = content.ends_with('\n');
    if !ends_with_newline {
        if let Some(last) = lines.last_mut() {
            last.push_str(if content.contains("\r\n") { "\r\n" } else { "\n" });
        }
    }

    if line_to_cut >= lines.len() {
        return Err(AppError::ValidationError(format!(
            "Cannot cut line {} from {}: file has {} lines",
            line_to_cut,
            path.display(),
            lines.len()
        )));
    }

    let target = match insert_at {
        InsertPosition::End => lines.len(),
        InsertPosition::Before(n) if n <= lines.len() => n,
        InsertPosition::Before(n) => {
            return Err(AppError::ValidationError(format!(
                "Cannot insert before line {} in {}: file has {} lines",
                n,
                path.display(),
                lines.len()
            )))
        }
    };

    let moved = lines.remove(line_to_cut);
    let target = if target > line_to_cut { target - 1 } else { target };
    lines.insert(target, moved);

    if !ends_with_newline {
        if let Some(last) = lines.last_mut() {
            let trimmed = last.trim_end_matches(&['\r', '\n'][..]).len();
            last.truncate(trimmed);
        }
    }
    let rewritten = lines.concat();

    let destination = output.unwrap_or(path);
    fs::write(destination, rewritten)?;
    info!(
        "Moved line {} of {} into {}",
        line_to_cut,
        path.display(),
        destination.display()
    );
    Ok(())
}
