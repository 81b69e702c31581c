pub mod config;
pub mod csv;
pub mod docx;
pub mod excel;
pub mod html;
pub mod structured;
pub mod text;
