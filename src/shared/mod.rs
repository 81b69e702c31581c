pub mod text_utils;

pub use text_utils::remove_extra_space;
