use thiserror::Error;

use crate::language::{LoadingError, NodeType};

/// Problems with the declarative configuration. All of these are raised
/// while setting up, before any document is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    ReadError(#[from] LoadingError),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Element '{0}' is defined more than once")]
    DuplicateElement(String),

    #[error("Element '{element}' cannot be declared with type {ty}")]
    UnsupportedType { element: String, ty: NodeType },

    #[error("Element '{element}' has malformed delimiter '{delimiter}'")]
    MalformedDelimiter { element: String, delimiter: String },

    #[error("Elements '{first}' and '{second}' share the delimiter '{delimiter}'")]
    DuplicateDelimiter {
        delimiter: String,
        first: String,
        second: String,
    },

    #[error("No paragraph element (a Leaf with an empty delimiter) is defined")]
    MissingParagraph,

    #[error("Element '{element}' refers to unknown matcher '{matcher}'")]
    UnknownMatcher { element: String, matcher: String },

    #[error("Element '{element}' refers to undefined template '{template}'")]
    UndefinedTemplate { element: String, template: String },

    #[error("Template '{name}' is invalid: {details}")]
    InvalidTemplate { name: String, details: String },

    #[error("Element '{0}' declares a cell separator but is not Walled")]
    InvalidSeparator(String),

    #[error("The {rule} rule refers to unknown element '{name}'")]
    UnknownElement { rule: String, name: String },

    #[error("Unknown transformation pass '{0}'")]
    UnknownPass(String),
}
