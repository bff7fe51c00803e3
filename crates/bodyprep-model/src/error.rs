//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a [`crate::PipelineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for the expected shape.
    #[error("failed to parse config {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// Input pattern is blank.
    #[error("input pattern must not be empty")]
    EmptyPattern,

    /// A unit conversion factor is zero, negative or not finite.
    #[error("conversion factor {name} must be a positive finite number, got {value}")]
    InvalidFactor { name: &'static str, value: f64 },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
