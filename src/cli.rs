//! Command-line arguments for the `tinybear` binary

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// File helpers: HTML validation, DOCX conversion, YAML and spreadsheet checks
#[derive(Parser, Debug)]
#[command(name = "tinybear", version, about)]
pub struct CliArgs {
    /// Log level used when RUST_LOG is not set (overrides the config file)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that an HTML file only uses the allowed tags and entities
    ValidateHtml {
        file: PathBuf,

        /// Accept bare text outside block elements
        #[arg(long)]
        allow_root_text: bool,

        /// Comma-separated allow-list, e.g. `p,a,strong`
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// Also check list nesting, paragraphs, unescaped `<` and unclosed tags
        #[arg(long)]
        strict: bool,
    },

    /// Convert every .docx file of a directory into HTML
    DocxToHtml {
        #[arg(long)]
        input_dir: Option<PathBuf>,

        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Do not log the generated HTML
        #[arg(short, long)]
        quiet: bool,
    },

    /// Check a YAML file for duplicate top-level keys and syntax errors
    CheckYaml { file: PathBuf },

    /// Export one sheet of an XLS/XLSX file to CSV
    ExcelToCsv {
        input: PathBuf,
        output: PathBuf,

        /// Sheet name (first sheet by default)
        #[arg(long)]
        sheet: Option<String>,

        /// Output delimiter (config value by default)
        #[arg(long)]
        delimiter: Option<String>,

        #[arg(long)]
        overwrite: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate_html() {
        let args = CliArgs::parse_from([
            "tinybear",
            "validate-html",
            "page.html",
            "--tags",
            "p,a",
            "--strict",
        ]);
        match args.command {
            Command::ValidateHtml {
                file, tags, strict, allow_root_text,
            } => {
                assert_eq!(file, PathBuf::from("page.html"));
                assert_eq!(tags, Some(vec!["p".to_string(), "a".to_string()]));
                assert!(strict);
                assert!(!allow_root_text);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_excel_to_csv_with_global_flag() {
        let args = CliArgs::parse_from([
            "tinybear",
            "excel-to-csv",
            "in.xlsx",
            "out.csv",
            "--sheet",
            "Data",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
        assert!(matches!(
            args.command,
            Command::ExcelToCsv { sheet: Some(ref s), overwrite: false, .. } if s == "Data"
        ));
    }
}
