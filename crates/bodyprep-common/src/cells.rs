//! Reading cells out of pipeline frames.
//!
//! Extracted frames hold text and converted measurement columns hold
//! `Float64`. In-memory sources may also hand in integer columns. These
//! helpers read all of them and render them back for output and reports.

use polars::prelude::*;

/// Text of a cell as written to output, `None` for null.
///
/// Text is returned unchanged and floats use [`format_float`]. Any other
/// value uses its Polars rendering.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use bodyprep_common::cell_text;
///
/// assert_eq!(cell_text(&AnyValue::Null), None);
/// assert_eq!(cell_text(&AnyValue::String("Ann")).as_deref(), Some("Ann"));
/// assert_eq!(cell_text(&AnyValue::Float64(81.5)).as_deref(), Some("81.5"));
/// assert_eq!(cell_text(&AnyValue::Float64(2.0)).as_deref(), Some("2"));
/// ```
pub fn cell_text(value: &AnyValue<'_>) -> Option<String> {
    if value.is_null() {
        return None;
    }
    if let Some(text) = value.extract_str() {
        return Some(text.to_string());
    }
    if value.is_float() {
        return value.extract::<f64>().map(format_float);
    }
    Some(value.str_value().into_owned())
}

/// Like [`cell_text`], with whitespace-only text folded to `None`.
pub fn non_blank_text(value: &AnyValue<'_>) -> Option<String> {
    cell_text(value).filter(|text| !text.trim().is_empty())
}

/// Numeric reading of a cell.
///
/// Numbers are taken as they are and text is parsed with
/// [`parse_number`]. Booleans, nulls, `NaN` and unparseable text are
/// `None`.
pub fn cell_number(value: &AnyValue<'_>) -> Option<f64> {
    let number = match value.extract_str() {
        Some(text) => parse_number(text),
        None if value.is_primitive_numeric() => value.extract::<f64>(),
        None => None,
    };
    number.filter(|v| !v.is_nan())
}

/// Parses trimmed decimal text, `None` when blank or invalid.
///
/// Exponent notation and `inf` are accepted.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Shortest round-trip rendering; integral values carry no decimal point.
///
/// # Examples
///
/// ```
/// use bodyprep_common::format_float;
///
/// assert_eq!(format_float(180.0), "180");
/// assert_eq!(format_float(1.5), "1.5");
/// assert_eq!(format_float(-0.0), "0");
/// ```
pub fn format_float(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_of_pipeline_dtypes() {
        assert_eq!(cell_text(&AnyValue::Null), None);
        assert_eq!(cell_text(&AnyValue::String("")).as_deref(), Some(""));
        assert_eq!(
            cell_text(&AnyValue::StringOwned("70".into())).as_deref(),
            Some("70")
        );
        assert_eq!(cell_text(&AnyValue::Float64(1.778)).as_deref(), Some("1.778"));
        assert_eq!(cell_text(&AnyValue::Float64(70.0)).as_deref(), Some("70"));
    }

    #[test]
    fn test_cell_text_of_other_values() {
        assert_eq!(cell_text(&AnyValue::Int64(-3)).as_deref(), Some("-3"));
        assert_eq!(cell_text(&AnyValue::Boolean(true)).as_deref(), Some("true"));
    }

    #[test]
    fn test_non_blank_text() {
        assert_eq!(non_blank_text(&AnyValue::Null), None);
        assert_eq!(non_blank_text(&AnyValue::String("   ")), None);
        assert_eq!(
            non_blank_text(&AnyValue::String(" Bob ")).as_deref(),
            Some(" Bob ")
        );
    }

    #[test]
    fn test_cell_number() {
        assert_eq!(cell_number(&AnyValue::Null), None);
        assert_eq!(cell_number(&AnyValue::Int64(70)), Some(70.0));
        assert_eq!(cell_number(&AnyValue::Float64(65.5)), Some(65.5));
        assert_eq!(cell_number(&AnyValue::Float64(f64::NAN)), None);
        assert_eq!(cell_number(&AnyValue::String(" 180 ")), Some(180.0));
        assert_eq!(cell_number(&AnyValue::String("NaN")), None);
        assert_eq!(cell_number(&AnyValue::String("tall")), None);
        assert_eq!(cell_number(&AnyValue::Boolean(true)), None);
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("  "), None);
        assert_eq!(parse_number("1.5e2"), Some(150.0));
        assert_eq!(parse_number("  72.25  "), Some(72.25));
        assert_eq!(parse_number("72in"), None);
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(40.0), "40");
        assert_eq!(format_float(10.5), "10.5");
        assert_eq!(format_float(-0.25), "-0.25");
    }
}
