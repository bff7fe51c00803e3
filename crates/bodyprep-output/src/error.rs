//! Error types for output writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing output. All of them are fatal to a
/// run.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to create the output's parent directory.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open the output file.
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a record.
    #[error("failed to write {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: csv::Error,
    },

    /// Failed to flush buffered output.
    #[error("failed to flush {target}: {source}")]
    Flush {
        target: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
