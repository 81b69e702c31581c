pub mod use_cases;

pub use use_cases::csv_checks::{
    check_csv_for_malformed_rows, check_csv_for_repetitions_in_column, compare_csv_files,
};
pub use use_cases::docx_converter::{convert_all, convert_file_from_doc};
pub use use_cases::html_validator::{validate_html, HtmlValidator};
