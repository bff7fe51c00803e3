//! BMI statistics over a transformed output file.
//!
//! The ratio and its bands only make sense once `Height` is in meters and
//! `Weight` in kilograms, so this reads the loader's output, not raw input.

use std::path::Path;

use anyhow::{Context, Result, bail};
use bodyprep_model::{BmiCategory, CanonicalField, bmi};
use bodyprep_transform::coerce_numeric;
use polars::prelude::*;

/// Statistics for one BMI band.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    pub category: BmiCategory,
    pub count: usize,
    pub mean_bmi: Option<f64>,
    pub min_bmi: Option<f64>,
    pub max_bmi: Option<f64>,
    pub mean_height: Option<f64>,
    pub mean_weight: Option<f64>,
}

/// BMI breakdown of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct BmiReport {
    /// Rows in the table.
    pub rows: usize,
    /// Rows with both measurements and a computable BMI.
    pub measured: usize,
    /// One entry per band, in ascending order, including empty bands.
    pub categories: Vec<CategoryStats>,
}

impl BmiReport {
    pub fn unmeasured(&self) -> usize {
        self.rows - self.measured
    }

    pub fn category(&self, category: BmiCategory) -> Option<&CategoryStats> {
        self.categories.iter().find(|stats| stats.category == category)
    }
}

/// Reads a transformed CSV file with every column as text.
///
/// Integral measurements carry no decimal point in the file; numbers are
/// parsed per cell when the report is computed.
pub fn read_transformed(path: &Path) -> Result<DataFrame> {
    let reader = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open {}", path.display()))?;
    reader
        .finish()
        .with_context(|| format!("read {}", path.display()))
}

/// Computes per-band statistics.
///
/// Rows where either measurement is null, or where the BMI cannot be
/// computed, are counted but not banded.
pub fn bmi_report(df: &DataFrame) -> Result<BmiReport> {
    let heights = measurement(df, CanonicalField::Height)?;
    let weights = measurement(df, CanonicalField::Weight)?;

    let mut samples: Vec<(BmiCategory, f64, f64, f64)> = Vec::new();
    for (height, weight) in heights.iter().zip(&weights) {
        let (Some(height), Some(weight)) = (*height, *weight) else {
            continue;
        };
        if let Some(value) = bmi(weight, height) {
            samples.push((BmiCategory::from_bmi(value), value, height, weight));
        }
    }

    let categories = BmiCategory::ALL
        .into_iter()
        .map(|category| {
            let members: Vec<_> = samples
                .iter()
                .filter(|sample| sample.0 == category)
                .collect();
            let bmis: Vec<f64> = members.iter().map(|sample| sample.1).collect();
            CategoryStats {
                category,
                count: members.len(),
                mean_bmi: mean(&bmis),
                min_bmi: bmis.iter().copied().reduce(f64::min),
                max_bmi: bmis.iter().copied().reduce(f64::max),
                mean_height: mean(&members.iter().map(|sample| sample.2).collect::<Vec<_>>()),
                mean_weight: mean(&members.iter().map(|sample| sample.3).collect::<Vec<_>>()),
            }
        })
        .collect();

    Ok(BmiReport {
        rows: df.height(),
        measured: samples.len(),
        categories,
    })
}

fn measurement(df: &DataFrame, field: CanonicalField) -> Result<Vec<Option<f64>>> {
    let Ok(column) = df.column(field.as_str()) else {
        bail!("missing '{field}' column; expected a transformed output file");
    };
    Ok(coerce_numeric(column)?)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_df(heights: &[Option<f64>], weights: &[Option<f64>]) -> DataFrame {
        DataFrame::new(vec![
            Series::new("Height".into(), heights.to_vec()).into_column(),
            Series::new("Weight".into(), weights.to_vec()).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn test_bands() {
        let df = test_df(
            &[Some(1.778), Some(1.651), Some(1.7), None, Some(1.6)],
            &[Some(81.64656), Some(63.50288), Some(50.0), Some(70.0), Some(90.0)],
        );

        let report = bmi_report(&df).unwrap();

        assert_eq!(report.rows, 5);
        assert_eq!(report.measured, 4);
        assert_eq!(report.unmeasured(), 1);
        assert_eq!(report.categories.len(), 4);

        let overweight = report.category(BmiCategory::Overweight).unwrap();
        assert_eq!(overweight.count, 1);
        assert_eq!(overweight.mean_bmi, Some(25.83));

        let normal = report.category(BmiCategory::Normal).unwrap();
        assert_eq!(normal.count, 1);
        assert_eq!(normal.min_bmi, Some(23.3));

        assert_eq!(report.category(BmiCategory::Underweight).unwrap().count, 1);
        assert_eq!(report.category(BmiCategory::Obese).unwrap().count, 1);
    }

    #[test]
    fn test_empty_bands_have_no_stats() {
        let df = test_df(&[Some(1.778)], &[Some(81.64656)]);
        let report = bmi_report(&df).unwrap();

        let obese = report.category(BmiCategory::Obese).unwrap();
        assert_eq!(obese.count, 0);
        assert_eq!(obese.mean_bmi, None);
        assert_eq!(obese.max_bmi, None);
    }

    #[test]
    fn test_missing_column() {
        let df = DataFrame::new(vec![
            Series::new("Height".into(), &[1.7]).into_column(),
        ])
        .unwrap();

        let err = bmi_report(&df).unwrap_err();
        assert!(err.to_string().contains("'Weight'"));
    }

    #[test]
    fn test_decimal_after_many_integral_rows() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("transformed_data.csv");
        let mut text = String::from("Height,Weight\n");
        for _ in 0..150 {
            text.push_str("2,80\n");
        }
        text.push_str("1.778,81.64656\n");
        std::fs::write(&path, text).unwrap();

        let df = read_transformed(&path).unwrap();
        let report = bmi_report(&df).unwrap();

        assert_eq!(report.rows, 151);
        assert_eq!(report.measured, 151);
        let overweight = report.category(BmiCategory::Overweight).unwrap();
        assert_eq!(overweight.count, 1);
        assert_eq!(overweight.max_bmi, Some(25.83));
    }
}
