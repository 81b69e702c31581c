use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::application::{convert_all, HtmlValidator};
use crate::cli::{CliArgs, Command};
use crate::domain::csv::delimiter_from_str;
use crate::domain::error::{AppError, Result};
use crate::domain::html::ValidationPolicy;
use crate::infrastructure::config::Settings;
use crate::infrastructure::excel::convert_excel_to_csv;
use crate::infrastructure::structured::check_yaml_file;
use crate::infrastructure::text::read_plain_text_from_file;

/// Install the fmt subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub fn run(args: CliArgs) -> Result<()> {
    let settings = match &args.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load()?,
    };
    init_tracing(args.log_level.as_deref().unwrap_or(&settings.log_level));
    debug!("Settings: {:?}", settings);

    match args.command {
        Command::ValidateHtml {
            file,
            allow_root_text,
            tags,
            strict,
        } => {
            let html = read_plain_text_from_file(&file)?;
            let mut policy = ValidationPolicy::new()
                .with_root_text(allow_root_text)
                .with_structure_checks(strict);
            if let Some(tags) = tags {
                policy = policy.with_allowed_tags(tags.iter());
            }
            HtmlValidator::new(policy).validate(&html)?;
            info!("{} is valid", file.display());
        }
        Command::DocxToHtml {
            input_dir,
            output_dir,
            quiet,
        } => {
            let input = input_dir.unwrap_or(settings.input_dir);
            let output = output_dir.unwrap_or(settings.output_dir);
            let written = convert_all(&input, &output, !quiet)?;
            info!("Converted {} files into {}", written.len(), output.display());
        }
        Command::CheckYaml { file } => {
            check_yaml_file(&file, true)?;
            info!("{} is valid", file.display());
        }
        Command::ExcelToCsv {
            input,
            output,
            sheet,
            delimiter,
            overwrite,
        } => {
            let delimiter = match delimiter {
                Some(d) => delimiter_from_str(&d).ok_or_else(|| {
                    AppError::ValidationError(format!(
                        "CSV delimiter must be a single ASCII character, got <{}>",
                        d
                    ))
                })?,
                None => settings.delimiter()?,
            };
            convert_excel_to_csv(&input, sheet.as_deref(), &output, delimiter, overwrite)?;
        }
    }
    Ok(())
}
