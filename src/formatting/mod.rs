//! Textual forms of a node tree: the canonical parenthesized form used for
//! structural comparison and diagnostics, and source text that parses back
//! into the same tree.

mod canonical;
mod source;

pub use canonical::{canonical, canonical_from};
pub use source::to_source;
