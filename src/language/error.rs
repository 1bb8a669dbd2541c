use std::path::PathBuf;

/// Failure to read a document or configuration file from disk.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{problem}: {details}")]
pub struct LoadingError {
    pub problem: String,
    pub details: String,
    pub filename: PathBuf,
}
