// Program wide top-level error presentation

mod format;

// Re-export all public symbols
pub use format::*;
