pub mod error;
pub mod html;
pub mod text;

// Row types for CSV and Excel helpers
pub mod csv;
