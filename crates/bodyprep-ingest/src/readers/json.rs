//! JSON reading.
//!
//! Two layouts are accepted. Line-delimited JSON (one object per line) is
//! tried first; if any line is not an object the whole file is parsed as a
//! single document instead. A document may be:
//!
//! - an array of objects, one per row
//! - an object of column arrays: `{"Height": [70, 65]}`
//! - an object of index-keyed columns: `{"Height": {"0": 70, "1": 65}}`
//!
//! A single-line object whose values are all arrays or objects is read as
//! one of the column layouts, not as a lone record.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use polars::prelude::DataFrame;
use serde_json::{Map, Value};

use crate::error::{IngestError, Result};
use crate::records::{Record, records_to_frame};

/// Reads a JSON file into a DataFrame.
pub fn read_json(path: &Path) -> Result<DataFrame> {
    let text = fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let records = match parse_lines(&text) {
        Some(records) => records,
        None => {
            tracing::debug!(
                path = %path.display(),
                "not line-delimited JSON, parsing as one document"
            );
            parse_document(&text, path)?
        }
    };

    records_to_frame(&records)
}

/// Parses one object per non-blank line.
///
/// Returns `None` when any line is not a JSON object, when there are no
/// lines at all, or when the only line is a column-oriented object.
fn parse_lines(text: &str) -> Option<Vec<Record>> {
    let mut objects = Vec::new();
    for line in text.lines().filter(|line| !line.trim().is_empty()) {
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(map)) => objects.push(map),
            _ => return None,
        }
    }
    match objects.as_slice() {
        [] => None,
        [only] if is_column_layout(only) => None,
        _ => Some(objects.into_iter().map(object_record).collect()),
    }
}

/// An object whose every value is an array or an object.
fn is_column_layout(map: &Map<String, Value>) -> bool {
    !map.is_empty()
        && map
            .values()
            .all(|value| matches!(value, Value::Array(_) | Value::Object(_)))
}

fn parse_document(text: &str, path: &Path) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(text).map_err(|e| IngestError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let shape_error = |reason: String| IngestError::JsonShape {
        path: path.to_path_buf(),
        reason,
    };

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(map) => Ok(object_record(map)),
                other => Err(shape_error(format!(
                    "array element {idx} is {}, expected an object",
                    kind(&other)
                ))),
            })
            .collect(),
        Value::Object(map) => column_records(map).map_err(shape_error),
        other => Err(shape_error(format!(
            "top-level value is {}, expected an array or object",
            kind(&other)
        ))),
    }
}

fn object_record(map: Map<String, Value>) -> Record {
    map.into_iter()
        .map(|(key, value)| (key, cell_text(&value)))
        .collect()
}

/// Turns a column-oriented object into rows.
///
/// Row labels are array positions or the keys of index objects. Rows
/// appear in the order their label is first seen.
fn column_records(map: Map<String, Value>) -> std::result::Result<Vec<Record>, String> {
    let mut labels: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns: Vec<(String, HashMap<String, Option<String>>)> = Vec::new();

    for (name, column) in map {
        let cells: Vec<(String, Option<String>)> = match column {
            Value::Array(values) => values
                .iter()
                .enumerate()
                .map(|(idx, value)| (idx.to_string(), cell_text(value)))
                .collect(),
            Value::Object(entries) => entries
                .iter()
                .map(|(label, value)| (label.clone(), cell_text(value)))
                .collect(),
            other => {
                return Err(format!(
                    "column '{name}' is {}, expected an array or object",
                    kind(&other)
                ));
            }
        };

        for (label, _) in &cells {
            if seen.insert(label.clone()) {
                labels.push(label.clone());
            }
        }
        columns.push((name, cells.into_iter().collect()));
    }

    Ok(labels
        .iter()
        .map(|label| {
            columns
                .iter()
                .map(|(name, cells)| (name.clone(), cells.get(label).cloned().flatten()))
                .collect()
        })
        .collect())
}

/// Renders a JSON value as cell text.
fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        nested => Some(nested.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::AnyValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_line_delimited() {
        let file = create_temp_json(
            "{\"name\": \"Ann\", \"height\": 70, \"weight\": 180}\n\n{\"name\": \"Bob\", \"height\": 65.5, \"weight\": null}\n",
        );
        let df = read_json(file.path()).unwrap();

        assert_eq!(names(&df), vec!["name", "height", "weight"]);
        assert_eq!(df.height(), 2);
        assert_eq!(
            df.column("height").unwrap().get(1).unwrap(),
            AnyValue::String("65.5")
        );
        assert_eq!(df.column("weight").unwrap().get(1).unwrap(), AnyValue::Null);
    }

    #[test]
    fn test_array_document() {
        let file = create_temp_json(
            r#"[
                {"height": 70, "weight": 180},
                {"height": 65, "weight": 140, "active": true}
            ]"#,
        );
        let df = read_json(file.path()).unwrap();

        assert_eq!(names(&df), vec!["height", "weight", "active"]);
        assert_eq!(df.column("active").unwrap().get(0).unwrap(), AnyValue::Null);
        assert_eq!(
            df.column("active").unwrap().get(1).unwrap(),
            AnyValue::String("true")
        );
    }

    #[test]
    fn test_column_arrays_document() {
        let file = create_temp_json(r#"{"Height": [70, 65], "Weight": [180, 140]}"#);
        let df = read_json(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(
            df.column("Weight").unwrap().get(1).unwrap(),
            AnyValue::String("140")
        );
    }

    #[test]
    fn test_index_keyed_document() {
        let file = create_temp_json(
            r#"{"Height": {"0": 70, "1": 65}, "Weight": {"1": 140, "0": 180}}"#,
        );
        let df = read_json(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(
            df.column("Weight").unwrap().get(0).unwrap(),
            AnyValue::String("180")
        );
    }

    #[test]
    fn test_nested_values_are_compact_json() {
        let file = create_temp_json("{\"height\": 70, \"tags\": [\"a\", \"b\"]}\n");
        let df = read_json(file.path()).unwrap();

        assert_eq!(
            df.column("tags").unwrap().get(0).unwrap(),
            AnyValue::String("[\"a\",\"b\"]")
        );
    }

    #[test]
    fn test_malformed_json() {
        let file = create_temp_json("{\"height\": 70,,}");
        let result = read_json(file.path());

        assert!(matches!(result, Err(IngestError::JsonParse { .. })));
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        let file = create_temp_json("42");
        let result = read_json(file.path());

        assert!(matches!(result, Err(IngestError::JsonShape { .. })));
    }

    #[test]
    fn test_empty_file_fails() {
        let file = create_temp_json("");
        assert!(read_json(file.path()).is_err());
    }
}
