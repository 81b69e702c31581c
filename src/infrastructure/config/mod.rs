use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::csv::delimiter_from_str;
use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "tinybear.toml";
pub const ENV_PREFIX: &str = "TINYBEAR_";

/// Defaults, then `tinybear.toml`, then `TINYBEAR_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Where `docx-to-html` looks for .docx files
    pub input_dir: PathBuf,
    /// Where converted HTML goes
    pub output_dir: PathBuf,
    pub csv_delimiter: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("docx_input"),
            output_dir: PathBuf::from("html_output"),
            csv_delimiter: ",".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Settings from `tinybear.toml` in the working directory, if present.
    pub fn load() -> Result<Self> {
        Self::from_file(Path::new(CONFIG_FILE))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| AppError::ValidationError(format!("Invalid configuration: {}", e)))
    }

    pub fn delimiter(&self) -> Result<u8> {
        delimiter_from_str(&self.csv_delimiter).ok_or_else(|| {
            AppError::ValidationError(format!(
                "CSV delimiter must be a single ASCII character, got <{}>",
                self.csv_delimiter
            ))
        })
    }
}
