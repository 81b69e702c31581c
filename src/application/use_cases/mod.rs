pub mod csv_checks;
pub mod docx_converter;
pub mod html_validator;
