//! Error types for extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or reading source files.
///
/// Only [`IngestError::Pattern`] and [`IngestError::Glob`] abort an
/// extraction run. Every other variant is recorded against the file it
/// came from and the remaining files are still read.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Discovery Errors ===
    /// The input pattern is not a valid glob.
    #[error("invalid input pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A path could not be read while expanding the pattern.
    #[error("failed to expand input pattern at {path}: {source}")]
    Glob {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Neither line-delimited nor whole-document JSON parsing succeeded.
    #[error("failed to parse JSON {path}: {message}")]
    JsonParse { path: PathBuf, message: String },

    /// Valid JSON that does not describe a table.
    #[error("unsupported JSON layout in {path}: {reason}")]
    JsonShape { path: PathBuf, reason: String },

    /// Malformed XML.
    #[error("failed to parse XML {path}: {message}")]
    XmlParse { path: PathBuf, message: String },

    // === Normalization Errors ===
    /// Two source columns of one file normalize to the same name.
    #[error("columns '{first}' and '{second}' both normalize to '{column}'")]
    ColumnCollision {
        column: String,
        first: String,
        second: String,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Whether this error aborts the whole extraction rather than one file.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Pattern { .. } | Self::Glob { .. })
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_display() {
        let err = IngestError::ColumnCollision {
            column: "Height".to_string(),
            first: "Height".to_string(),
            second: "height_in".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "columns 'Height' and 'height_in' both normalize to 'Height'"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_pattern_error_is_fatal() {
        let source = glob::Pattern::new("[").unwrap_err();
        let err = IngestError::Pattern {
            pattern: "[".to_string(),
            source,
        };
        assert!(err.is_fatal());
        assert!(err.to_string().starts_with("invalid input pattern '['"));
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
