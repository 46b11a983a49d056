//! Catalog error type.

use thiserror::Error;

/// Errors raised while reading, validating or writing a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Context '{name}' is defined more than once")]
    DuplicateContext { name: String },

    #[error("Context #{index} has an empty name")]
    EmptyContextName { index: usize },

    #[error("Message #{index} in context '{context}' has an empty source text")]
    EmptySource { context: String, index: usize },
}
