//! Error types for endclean library.

use std::io;
use thiserror::Error;

/// Result type alias for endclean operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for endclean library.
///
/// The cleaning pipeline itself never fails; these errors only come from
/// reading and writing lesson documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document is not valid JSON, or could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is valid but not a lesson document.
    #[error("Invalid lesson document: {0}")]
    InvalidShape(String),
}
