//! Numeric coercion.

use bodyprep_common::cell_number;
use polars::prelude::*;

use crate::error::Result;

/// Reads every cell of a column as a number.
///
/// Numeric dtypes convert directly and text is trimmed and parsed. Nulls,
/// `NaN`, and anything unparseable come back as `None`.
pub fn coerce_numeric(column: &Column) -> Result<Vec<Option<f64>>> {
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        values.push(cell_number(&column.get(idx)?));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_column() {
        let column = Series::new(
            "Height".into(),
            &[Some("70"), Some(" 65.5 "), Some("tall"), None, Some(""), Some("NaN")],
        )
        .into_column();

        let values = coerce_numeric(&column).unwrap();
        assert_eq!(values, vec![Some(70.0), Some(65.5), None, None, None, None]);
    }

    #[test]
    fn test_numeric_column() {
        let column = Series::new("Weight".into(), &[Some(180i64), None, Some(140)]).into_column();

        let values = coerce_numeric(&column).unwrap();
        assert_eq!(values, vec![Some(180.0), None, Some(140.0)]);
    }

    #[test]
    fn test_exponent_and_infinity() {
        let column = Series::new("Height".into(), &["7e1", "inf"]).into_column();

        let values = coerce_numeric(&column).unwrap();
        assert_eq!(values, vec![Some(70.0), Some(f64::INFINITY)]);
    }
}
