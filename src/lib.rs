pub mod app;
pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use application::{
    check_csv_for_malformed_rows, check_csv_for_repetitions_in_column, compare_csv_files,
    convert_all, convert_file_from_doc, validate_html, HtmlValidator,
};
pub use domain::error::{AppError, Result};
pub use domain::html::{HtmlViolation, ValidationPolicy, ViolationRule, DEFAULT_ALLOWED_TAGS};
pub use domain::text::{InsertPosition, TextContent, TextEncoding};
pub use infrastructure::config::Settings;
pub use infrastructure::csv::{CsvParser, CsvWriter};
pub use infrastructure::docx::read_from_doc;
pub use infrastructure::excel::{convert_excel_to_csv, ExcelReader};
pub use infrastructure::structured::{check_yaml_file, read_json_toml_yaml, DataFormat};
pub use infrastructure::text::{
    check_encoding_of_file, move_line, read_non_empty_lines_from_txt_file,
    read_plain_text_from_file, write_plain_text_to_file,
};
pub use shared::remove_extra_space;
