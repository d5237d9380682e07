//! @ai:module:intent Define error types for the fern parser
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all parsing operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Unsupported file type '{extension}' for file: {path}")]
    UnsupportedFileType { path: PathBuf, extension: String },

    #[error("Application path must be a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// @ai:intent Check whether this error means the input path does not exist
    /// @ai:effects pure
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::FileNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
