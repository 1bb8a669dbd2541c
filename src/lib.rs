//! A configurable markup toolchain: a delimiter-driven recognizer that turns
//! source text into a node tree according to a table of element
//! definitions, transformation passes that restructure the tree, and an
//! aggregator that collects indexes from it.

pub mod aggregating;
pub mod config;
pub mod formatting;
pub mod language;
pub mod matching;
pub mod parsing;
pub mod rendering;
pub mod scanning;
pub mod transforming;
