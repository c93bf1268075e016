//! Error types for the model crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// The document text could not be decoded, or a node is missing a
    /// required field (`id`, `kind`, `children`).
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        ModelError::MalformedDocument(e.to_string())
    }
}
