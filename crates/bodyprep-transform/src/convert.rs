//! Unit conversion of the canonical measurement columns.

use std::fmt;

use bodyprep_model::{CanonicalField, PipelineConfig, UnitConversion};
use polars::prelude::*;
use tracing::{debug, info};

use crate::coerce::coerce_numeric;
use crate::error::Result;

/// What happened to one canonical column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The column was converted. `nulls` counts cells that were missing or
    /// not numeric.
    Converted { converted: usize, nulls: usize },
    /// The table has no such column.
    MissingColumn,
    /// The table had no data, so nothing was attempted.
    EmptyTable,
}

impl ConversionOutcome {
    pub fn is_converted(self) -> bool {
        matches!(self, Self::Converted { .. })
    }
}

impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Converted { converted, nulls } => {
                write!(f, "converted {converted}, null {nulls}")
            }
            Self::MissingColumn => f.write_str("column not found"),
            Self::EmptyTable => f.write_str("no data"),
        }
    }
}

/// Per-field outcomes of one transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformReport {
    pub height: ConversionOutcome,
    pub weight: ConversionOutcome,
}

impl TransformReport {
    fn empty_table() -> Self {
        Self {
            height: ConversionOutcome::EmptyTable,
            weight: ConversionOutcome::EmptyTable,
        }
    }

    pub fn outcome(&self, field: CanonicalField) -> ConversionOutcome {
        match field {
            CanonicalField::Height => self.height,
            CanonicalField::Weight => self.weight,
        }
    }

    fn set(&mut self, field: CanonicalField, outcome: ConversionOutcome) {
        match field {
            CanonicalField::Height => self.height = outcome,
            CanonicalField::Weight => self.weight = outcome,
        }
    }
}

/// Converts measurement columns using a fixed set of factors.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer {
    units: UnitConversion,
}

impl Transformer {
    pub fn new(units: UnitConversion) -> Self {
        Self { units }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.units)
    }

    pub fn units(&self) -> &UnitConversion {
        &self.units
    }

    /// Converts `Height` and `Weight` in place. See [`transform`].
    pub fn apply(&self, df: &mut DataFrame) -> Result<TransformReport> {
        transform(df, &self.units)
    }
}

/// Converts `Height` and `Weight` in place to SI units.
///
/// Each present column is replaced by a `Float64` column holding the
/// coerced value times its factor. A missing column is skipped and
/// reported, never an error. An empty table is returned untouched.
pub fn transform(df: &mut DataFrame, units: &UnitConversion) -> Result<TransformReport> {
    info!("Transformation started");

    if df.height() == 0 || df.width() == 0 {
        info!("No data to transform");
        return Ok(TransformReport::empty_table());
    }

    let mut report = TransformReport::empty_table();
    for field in CanonicalField::ALL {
        let outcome = convert_field(df, field, units.factor(field))?;
        match outcome {
            ConversionOutcome::Converted { converted, nulls } => {
                info!(converted, nulls, "Converted {field} to {}", field.si_unit());
            }
            _ => {
                let name = field.as_str().to_lowercase();
                info!("{field} column not found; skipping {name} conversion");
            }
        }
        report.set(field, outcome);
    }

    info!("Transformation completed");
    Ok(report)
}

fn convert_field(
    df: &mut DataFrame,
    field: CanonicalField,
    factor: f64,
) -> Result<ConversionOutcome> {
    let name = field.as_str();
    let Ok(column) = df.column(name) else {
        return Ok(ConversionOutcome::MissingColumn);
    };

    let values: Vec<Option<f64>> = coerce_numeric(column)?
        .into_iter()
        .map(|value| value.map(|v| v * factor))
        .collect();
    let nulls = values.iter().filter(|v| v.is_none()).count();
    let converted = values.len() - nulls;

    debug!(column = name, factor, converted, nulls, "replacing column");
    df.with_column(Series::new(name.into(), values))?;

    Ok(ConversionOutcome::Converted { converted, nulls })
}
