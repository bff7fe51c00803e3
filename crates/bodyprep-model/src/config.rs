//! Pipeline configuration.
//!
//! A single [`PipelineConfig`] is built at startup (defaults, then an
//! optional TOML file, then command-line overrides) and passed into each
//! stage. No stage reads global paths.
//!
//! # Example
//!
//! ```toml
//! input_pattern = "data/raw/*"
//! output_path = "out/transformed_data.csv"
//! log_path = "out/log_file.txt"
//!
//! [units]
//! inches_to_meters = 0.0254
//! pounds_to_kilograms = 0.453592
//!
//! [columns]
//! height = ["height", "ht", "stature_in"]
//! weight = ["weight", "wt"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::fields::{CanonicalField, ColumnAliases};

/// Default glob for input discovery.
pub const DEFAULT_INPUT_PATTERN: &str = "./unzipped_folder/*";

/// Default path of the transformed output file.
pub const DEFAULT_OUTPUT_PATH: &str = "transformed_data.csv";

/// Default path of the append-only run log.
pub const DEFAULT_LOG_PATH: &str = "log_file.txt";

/// Meters per inch.
pub const INCHES_TO_METERS: f64 = 0.0254;

/// Kilograms per pound.
pub const POUNDS_TO_KILOGRAMS: f64 = 0.453592;

/// Multipliers from source units to SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UnitConversion {
    /// Factor applied to `Height` values.
    pub inches_to_meters: f64,
    /// Factor applied to `Weight` values.
    pub pounds_to_kilograms: f64,
}

impl Default for UnitConversion {
    fn default() -> Self {
        Self {
            inches_to_meters: INCHES_TO_METERS,
            pounds_to_kilograms: POUNDS_TO_KILOGRAMS,
        }
    }
}

impl UnitConversion {
    /// Factor for a canonical field.
    pub fn factor(&self, field: CanonicalField) -> f64 {
        match field {
            CanonicalField::Height => self.inches_to_meters,
            CanonicalField::Weight => self.pounds_to_kilograms,
        }
    }

    /// Rejects factors that would not produce meaningful measurements.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("inches_to_meters", self.inches_to_meters),
            ("pounds_to_kilograms", self.pounds_to_kilograms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidFactor { name, value });
            }
        }
        Ok(())
    }
}

/// Configuration for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Glob pattern expanded to find input files.
    pub input_pattern: String,
    /// Where the loader writes the delimited output.
    pub output_path: PathBuf,
    /// Append-only run log.
    pub log_path: PathBuf,
    /// Unit conversion constants.
    pub units: UnitConversion,
    /// Column-name variants recognized as canonical fields.
    pub columns: ColumnAliases,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_pattern: DEFAULT_INPUT_PATTERN.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            units: UnitConversion::default(),
            columns: ColumnAliases::default(),
        }
    }
}

impl PipelineConfig {
    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            origin: "<inline>".to_string(),
            source,
        })
    }

    /// Loads a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            origin: path.display().to_string(),
            source,
        })
    }

    /// Set the input glob pattern.
    #[must_use]
    pub fn with_input_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.input_pattern = pattern.into();
        self
    }

    /// Set the output file path.
    #[must_use]
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set the run log path.
    #[must_use]
    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = path.into();
        self
    }

    /// Set the unit conversion constants.
    #[must_use]
    pub fn with_units(mut self, units: UnitConversion) -> Self {
        self.units = units;
        self
    }

    /// Set the recognized column aliases.
    #[must_use]
    pub fn with_columns(mut self, columns: ColumnAliases) -> Self {
        self.columns = columns;
        self
    }

    /// Checks the invariants the stages rely on.
    pub fn validate(&self) -> Result<()> {
        if self.input_pattern.trim().is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        self.units.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.input_pattern, "./unzipped_folder/*");
        assert_eq!(config.output_path, PathBuf::from("transformed_data.csv"));
        assert_eq!(config.log_path, PathBuf::from("log_file.txt"));
        assert_eq!(config.units.inches_to_meters, 0.0254);
        assert_eq!(config.units.pounds_to_kilograms, 0.453592);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = PipelineConfig::from_toml_str(
            "input_pattern = \"data/*.csv\"\n[units]\npounds_to_kilograms = 0.45\n",
        )
        .unwrap();
        assert_eq!(config.input_pattern, "data/*.csv");
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.units.inches_to_meters, INCHES_TO_METERS);
        assert_eq!(config.units.pounds_to_kilograms, 0.45);
        assert_eq!(config.columns, ColumnAliases::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = PipelineConfig::from_toml_str("input_glob = \"*\"\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn builder_overrides() {
        let config = PipelineConfig::default()
            .with_input_pattern("in/*")
            .with_output_path("out.csv")
            .with_log_path("run.log");
        assert_eq!(config.input_pattern, "in/*");
        assert_eq!(config.output_path, PathBuf::from("out.csv"));
        assert_eq!(config.log_path, PathBuf::from("run.log"));
    }

    #[test]
    fn validate_rejects_bad_factors_and_patterns() {
        let bad_units = PipelineConfig::default().with_units(UnitConversion {
            inches_to_meters: 0.0,
            pounds_to_kilograms: POUNDS_TO_KILOGRAMS,
        });
        assert!(matches!(
            bad_units.validate(),
            Err(ConfigError::InvalidFactor {
                name: "inches_to_meters",
                ..
            })
        ));

        let nan_units = UnitConversion {
            inches_to_meters: INCHES_TO_METERS,
            pounds_to_kilograms: f64::NAN,
        };
        assert!(nan_units.validate().is_err());

        let blank = PipelineConfig::default().with_input_pattern("  ");
        assert!(matches!(blank.validate(), Err(ConfigError::EmptyPattern)));
    }

    #[test]
    fn factor_per_field() {
        let units = UnitConversion::default();
        assert_eq!(units.factor(CanonicalField::Height), INCHES_TO_METERS);
        assert_eq!(units.factor(CanonicalField::Weight), POUNDS_TO_KILOGRAMS);
    }
}
