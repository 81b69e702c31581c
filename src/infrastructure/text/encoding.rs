// ============================================================
// ENCODING DETECTION
// ============================================================
// Text files come as UTF-8 (newer) or Windows-1251 (older).
// Only these two alternatives are considered.

use std::fs;
use std::path::Path;

use crate::domain::error::{AppError, Result};
use crate::domain::text::TextEncoding;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// UTF-8 when the bytes are valid UTF-8 (after an optional BOM), Windows-1251 otherwise.
pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if std::str::from_utf8(body).is_ok() {
        TextEncoding::Utf8
    } else {
        TextEncoding::Windows1251
    }
}

/// Decode bytes with the detected encoding. A UTF-8 BOM is dropped.
pub fn decode(bytes: &[u8]) -> (String, TextEncoding) {
    let encoding = detect_encoding(bytes);
    let text = encoding
        .encoding()
        .decode_with_bom_removal(bytes)
        .0
        .into_owned();
    (text, encoding)
}

/// Read a whole file and decode it.
pub fn read_decoded(path: &Path) -> Result<(String, TextEncoding)> {
    ensure_exists(path)?;
    let bytes = fs::read(path)
        .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(decode(&bytes))
}

pub(crate) fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("File {} not found", path.display())))
    }
}
