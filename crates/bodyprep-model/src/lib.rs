//! Shared model types for the bodyprep pipeline.
//!
//! - [`PipelineConfig`]: the configuration object handed to every stage
//! - [`CanonicalField`] and [`ColumnAliases`]: the canonical schema
//! - [`BmiCategory`] and [`bmi`]: the derived ratio consumed by reporting

pub mod bmi;
pub mod config;
pub mod error;
pub mod fields;

pub use bmi::{BmiCategory, bmi};
pub use config::{
    DEFAULT_INPUT_PATTERN, DEFAULT_LOG_PATH, DEFAULT_OUTPUT_PATH, INCHES_TO_METERS,
    POUNDS_TO_KILOGRAMS, PipelineConfig, UnitConversion,
};
pub use error::{ConfigError, Result};
pub use fields::{CanonicalField, ColumnAliases, match_key, trim_column_name};
