// Types representing the node tree

mod error;
mod tree;
mod types;

// Re-export all public symbols
pub use error::*;
pub use tree::*;
pub use types::*;
