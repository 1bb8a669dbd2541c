//! Recognizer turning source text plus a table of element definitions into
//! a node tree.

use std::path::Path;
use tracing::debug;

use crate::language::{LoadingError, Tree};
use crate::scanning::{self, Diagnostic};

mod elements;
mod inline;
pub mod parser;
mod scope;
pub mod table;

pub use elements::Elements;
pub(crate) use inline::closing_delimiter;
pub use parser::Parser;

/// The result of parsing one document: the text as decoded, the tree
/// recognized from it, and any encoding problems that were repaired along
/// the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub source: String,
    pub tree: Tree,
    pub diagnostics: Vec<Diagnostic>,
}

/// Read a file and return its raw bytes; decoding happens in parse().
pub fn load(filename: &Path) -> Result<Vec<u8>, LoadingError> {
    match std::fs::read(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: filename
                        .display()
                        .to_string(),
                    filename: filename.to_path_buf(),
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename: filename.to_path_buf(),
                }),
            }
        }
    }
}

/// Decode and parse raw input. This always yields a tree; encoding problems
/// are reported in the Document's diagnostics.
pub fn parse(elements: &Elements, input: &[u8]) -> Document {
    let decoded = scanning::decode(input);
    let tree = Parser::new(elements).parse(&decoded.text);

    debug!(
        "Parsed {} node{} with {} diagnostic{}",
        tree.len(),
        if tree.len() == 1 { "" } else { "s" },
        decoded
            .diagnostics
            .len(),
        if decoded
            .diagnostics
            .len()
            == 1
        {
            ""
        } else {
            "s"
        }
    );

    Document {
        source: decoded.text,
        tree,
        diagnostics: decoded.diagnostics,
    }
}

/// Parse text that is already known to be well formed.
pub fn parse_str(elements: &Elements, source: &str) -> Tree {
    Parser::new(elements).parse(source)
}
