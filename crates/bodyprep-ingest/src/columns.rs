//! Column-name normalization.

use std::collections::HashMap;

use bodyprep_model::{ColumnAliases, trim_column_name};
use polars::prelude::*;

use crate::error::{IngestError, Result};

/// Normalized form of one source column name.
///
/// Recognized height/weight variants become the canonical name; anything
/// else is trimmed and title-cased.
///
/// # Examples
///
/// ```
/// use bodyprep_ingest::normalized_name;
/// use bodyprep_model::ColumnAliases;
///
/// let aliases = ColumnAliases::default();
/// assert_eq!(normalized_name(" Height (in) ", &aliases), "Height");
/// assert_eq!(normalized_name("LBS", &aliases), "Weight");
/// assert_eq!(normalized_name("first_name", &aliases), "First_Name");
/// ```
pub fn normalized_name(raw: &str, aliases: &ColumnAliases) -> String {
    match aliases.resolve(raw) {
        Some(field) => field.as_str().to_string(),
        None => title_case(trim_column_name(raw)),
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
///
/// A word starts at any letter that follows a non-letter, so digits,
/// underscores and punctuation all act as separators.
///
/// # Examples
///
/// ```
/// use bodyprep_ingest::title_case;
///
/// assert_eq!(title_case("AGE"), "Age");
/// assert_eq!(title_case("blood type"), "Blood Type");
/// assert_eq!(title_case("id2code"), "Id2Code");
/// ```
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_word = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Renames every column of a frame to its normalized name.
///
/// Fails with [`IngestError::ColumnCollision`] when two columns end up with
/// the same name; the frame is not merged.
pub fn normalize_columns(df: &DataFrame, aliases: &ColumnAliases) -> Result<DataFrame> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut columns = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        let original = column.name().to_string();
        let normalized = normalized_name(&original, aliases);

        if let Some(first) = seen.get(&normalized) {
            return Err(IngestError::ColumnCollision {
                column: normalized,
                first: first.clone(),
                second: original,
            });
        }

        let mut renamed = column.clone();
        renamed.rename(normalized.as_str().into());
        columns.push(renamed);
        seen.insert(normalized, original);
    }

    Ok(DataFrame::new_with_height(df.height(), columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_df(names: &[&str]) -> DataFrame {
        let columns = names
            .iter()
            .map(|name| Series::new((*name).into(), &["1"]).into_column())
            .collect();
        DataFrame::new(columns).unwrap()
    }

    fn column_names(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("name"), "Name");
        assert_eq!(title_case("FIRST NAME"), "First Name");
        assert_eq!(title_case("blood_type"), "Blood_Type");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_normalize_mixed_columns() {
        let df = test_df(&["\u{feff}Height_in", " Weight (lbs) ", "first name", "AGE"]);
        let normalized = normalize_columns(&df, &ColumnAliases::default()).unwrap();

        assert_eq!(
            column_names(&normalized),
            vec!["Height", "Weight", "First Name", "Age"]
        );
        assert_eq!(normalized.height(), 1);
    }

    #[test]
    fn test_canonical_collision() {
        let df = test_df(&["Height", "height_in"]);
        let err = normalize_columns(&df, &ColumnAliases::default()).unwrap_err();

        match err {
            IngestError::ColumnCollision {
                column,
                first,
                second,
            } => {
                assert_eq!(column, "Height");
                assert_eq!(first, "Height");
                assert_eq!(second, "height_in");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_passthrough_collision() {
        let df = test_df(&["name", "NAME"]);
        let result = normalize_columns(&df, &ColumnAliases::default());

        assert!(matches!(result, Err(IngestError::ColumnCollision { .. })));
    }

    #[test]
    fn test_custom_aliases() {
        let aliases = ColumnAliases {
            height: vec!["stature".to_string()],
            weight: vec!["mass_lb".to_string()],
        };
        let df = test_df(&["Stature", "MASS_LB", "wt"]);
        let normalized = normalize_columns(&df, &aliases).unwrap();

        assert_eq!(column_names(&normalized), vec!["Height", "Weight", "Wt"]);
    }
}
