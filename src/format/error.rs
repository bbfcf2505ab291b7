//! Error types for document and manifest operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, importing, or persisting documents.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed JSON carries neither pages nor hotspots
    #[error("unrecognized document: {message}")]
    UnrecognizedDocument {
        /// Description of what was expected
        message: String,
    },

    /// Document file not found at the expected path
    #[error("document not found: {path:?}")]
    DocumentNotFound {
        /// Path where the document was expected
        path: PathBuf,
    },
}

impl FormatError {
    /// Create an unrecognized-document error with a message.
    pub fn unrecognized(message: impl Into<String>) -> Self {
        Self::UnrecognizedDocument {
            message: message.into(),
        }
    }
}
