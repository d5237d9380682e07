//! @ai:module:intent Error types for the evaluation engine
//! @ai:module:layer domain
//! @ai:module:public_api EvalError, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for evaluation operations
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Parse error: {0}")]
    Parse(#[from] fern_parser::Error),

    #[error("Could not parse files: {golden}, {generated}")]
    UnparseableFile { golden: PathBuf, generated: PathBuf },

    #[error("Score '{field}' must be between 0 and 1, got {value}")]
    InvalidScore { field: &'static str, value: f64 },

    #[error("Unsupported evaluation mode '{0}' (expected file, app or auto)")]
    InvalidMode(String),

    #[error("Collaborator '{name}' failed: {message}")]
    Collaborator { name: &'static str, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No suitable files found in directory: {0}")]
    NoSuitableFile(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EvalError {
    /// @ai:intent Check whether the error means an input file does not exist
    /// @ai:effects pure
    pub fn is_not_found(&self) -> bool {
        match self {
            EvalError::Parse(e) => e.is_not_found(),
            EvalError::NoSuitableFile(_) => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
