// ============================================================
// HTML DOMAIN LAYER
// ============================================================
// Tree, policy and violation types for the HTML validator
// No I/O, no parsing

pub mod entities;
mod node;
mod policy;
mod violation;

pub use node::{HtmlDocument, HtmlNode, RootKind, CONTAINER_ELEMENTS};
pub use policy::{ValidationPolicy, DEFAULT_ALLOWED_TAGS};
pub use violation::{excerpt, HtmlViolation, ViolationRule};
