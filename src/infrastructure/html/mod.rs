// ============================================================
// HTML INFRASTRUCTURE LAYER
// ============================================================
// Tree construction and raw source scanning

pub mod source_scanner;
mod tree_builder;

pub use source_scanner::{scan, Segment};
pub use tree_builder::build_tree;
