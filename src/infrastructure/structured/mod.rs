// ============================================================
// JSON / TOML / YAML FILES
// ============================================================
// Load a data file by extension and sanity-check YAML sources

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::{AppError, Result};

/// A top-level mapping key: optional list dash, no spaces or dashes in the key, then a colon.
static TOP_LEVEL_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(- )?(?P<key>[^\s-]+)\s?:.*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Json,
    Toml,
    Yaml,
}

impl DataFormat {
    /// Format from the file extension (`json`, `toml`, `yaml`, `yml`), case-insensitive.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataFormat::Json => write!(f, "JSON"),
            DataFormat::Toml => write!(f, "TOML"),
            DataFormat::Yaml => write!(f, "YAML"),
        }
    }
}

/// Read a JSON, TOML or YAML file. The result is always a non-empty object or array.
#[instrument]
pub fn read_json_toml_yaml(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(AppError::NotFound(format!(
            "Cannot read JSON, TOML or YAML from non-existent file {}",
            path.display()
        )));
    }

    let format = DataFormat::from_path(path).ok_or_else(|| {
        warn!("Unknown file extension");
        AppError::UnsupportedFormat(format!(
            "File {} cannot be converted",
            path.file_name()
                .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
        ))
    })?;

    let content = fs::read_to_string(path)?;
    debug!("Parsing {} as {}", path.display(), format);

    let parsed = match format {
        DataFormat::Json => serde_json::from_str::<Value>(&content).ok(),
        DataFormat::Toml => toml::from_str::<Value>(&content).ok(),
        DataFormat::Yaml => {
            check_yaml_content(path, &content)?;
            yaml_to_json(&content).ok()
        }
    };

    match parsed {
        Some(data) if is_non_empty_container(&data) => Ok(data),
        _ => Err(malformed(path)),
    }
}

/// Check a YAML file for duplicate top-level keys, syntax errors and a scalar top level.
pub fn check_yaml_file(path: &Path, verbose: bool) -> Result<()> {
    if verbose {
        info!("Checking {}", path.display());
    }
    if !path.exists() {
        return Err(AppError::NotFound(format!("File {} not found", path.display())));
    }

    let content = fs::read_to_string(path)?;
    let data = check_yaml_content(path, &content)?;

    if verbose {
        debug!("YAML data of {}: {}", path.display(), data);
    }
    Ok(())
}

fn check_yaml_content(path: &Path, content: &str) -> Result<Value> {
    // The YAML parser keeps the last of repeated keys, so top-level duplicates are caught here.
    let mut seen = HashSet::new();
    for line in content.lines() {
        let key = TOP_LEVEL_KEY_PATTERN
            .captures(line)
            .and_then(|caps| caps.name("key"))
            .map(|m| m.as_str());
        if let Some(key) = key {
            if !seen.insert(key) {
                return Err(AppError::ParseError(format!(
                    "File {} contains more than one dictionary key <{}> at the top level",
                    path.display(),
                    key
                )));
            }
        }
    }

    let data = yaml_to_json(content).map_err(|e| {
        info!("{}", e);
        AppError::ParseError(format!("Error reading YAML from file {}", path.display()))
    })?;

    if data.is_object() || data.is_array() {
        Ok(data)
    } else {
        Err(malformed(path))
    }
}

fn yaml_to_json(content: &str) -> std::result::Result<Value, String> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    serde_json::to_value(yaml).map_err(|e| e.to_string())
}

fn is_non_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

fn malformed(path: &Path) -> AppError {
    AppError::ParseError(format!(
        "Could not read file {} because of malformed data",
        path.display()
    ))
}
