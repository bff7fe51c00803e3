//! Canonical measurement fields and the source-column variants that map to them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A semantically recognized column in the output schema.
///
/// Every other column is a passthrough column: renamed cosmetically,
/// never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalField {
    /// Body height. Inches in the source, meters after transformation.
    Height,
    /// Body weight. Pounds in the source, kilograms after transformation.
    Weight,
}

impl CanonicalField {
    /// All canonical fields in schema order.
    pub const ALL: [CanonicalField; 2] = [CanonicalField::Height, CanonicalField::Weight];

    /// Column name used in the output file.
    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalField::Height => "Height",
            CanonicalField::Weight => "Weight",
        }
    }

    /// Unit the source files are expected to use.
    pub fn source_unit(self) -> &'static str {
        match self {
            CanonicalField::Height => "inches",
            CanonicalField::Weight => "pounds",
        }
    }

    /// SI unit the transformed column is expressed in.
    pub fn si_unit(self) -> &'static str {
        match self {
            CanonicalField::Height => "meters",
            CanonicalField::Weight => "kg",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-cased source column names recognized for each canonical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnAliases {
    /// Variants that resolve to [`CanonicalField::Height`].
    pub height: Vec<String>,
    /// Variants that resolve to [`CanonicalField::Weight`].
    pub weight: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            height: to_owned_list(&[
                "height",
                "height_in",
                "height(in)",
                "height (in)",
                "height_inches",
                "inches",
                "ht",
            ]),
            weight: to_owned_list(&[
                "weight",
                "weight_lbs",
                "weight_lb",
                "weight(lbs)",
                "weight (lbs)",
                "weight(pounds)",
                "lbs",
                "pounds",
                "wt",
            ]),
        }
    }
}

impl ColumnAliases {
    /// Resolves a raw source column name to a canonical field.
    ///
    /// The name is trimmed (including a byte-order mark) and lower-cased
    /// before matching, as are the aliases.
    pub fn resolve(&self, raw: &str) -> Option<CanonicalField> {
        let key = match_key(raw);
        CanonicalField::ALL.into_iter().find(|field| {
            self.aliases_for(*field)
                .iter()
                .any(|alias| match_key(alias) == key)
        })
    }

    /// Aliases configured for a field.
    pub fn aliases_for(&self, field: CanonicalField) -> &[String] {
        match field {
            CanonicalField::Height => &self.height,
            CanonicalField::Weight => &self.weight,
        }
    }
}

/// Strips surrounding whitespace and byte-order marks from a column name.
pub fn trim_column_name(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Trimmed, lower-cased form of a column name used for alias matching.
pub fn match_key(raw: &str) -> String {
    trim_column_name(raw).to_lowercase()
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_height_variants() {
        let aliases = ColumnAliases::default();
        for raw in ["Height", "height_in", " HT ", "Height(in)", "height (in)", "Inches"] {
            assert_eq!(aliases.resolve(raw), Some(CanonicalField::Height), "{raw}");
        }
    }

    #[test]
    fn resolves_weight_variants() {
        let aliases = ColumnAliases::default();
        for raw in ["WEIGHT", "Weight_lbs", "wt", "LBS", "pounds", "Weight(Pounds)"] {
            assert_eq!(aliases.resolve(raw), Some(CanonicalField::Weight), "{raw}");
        }
    }

    #[test]
    fn leaves_other_columns_unresolved() {
        let aliases = ColumnAliases::default();
        assert_eq!(aliases.resolve("name"), None);
        assert_eq!(aliases.resolve("height_cm_estimate"), None);
        assert_eq!(aliases.resolve(""), None);
    }

    #[test]
    fn strips_byte_order_mark() {
        let aliases = ColumnAliases::default();
        assert_eq!(aliases.resolve("\u{feff}Height"), Some(CanonicalField::Height));
    }

    #[test]
    fn custom_aliases_replace_defaults() {
        let aliases = ColumnAliases {
            height: vec!["Stature".to_string()],
            weight: vec!["mass_lb".to_string()],
        };
        assert_eq!(aliases.resolve("stature"), Some(CanonicalField::Height));
        assert_eq!(aliases.resolve("MASS_LB"), Some(CanonicalField::Weight));
        assert_eq!(aliases.resolve("height"), None);
    }

    #[test]
    fn field_names_and_units() {
        assert_eq!(CanonicalField::Height.to_string(), "Height");
        assert_eq!(CanonicalField::Weight.as_str(), "Weight");
        assert_eq!(CanonicalField::Height.si_unit(), "meters");
        assert_eq!(CanonicalField::Weight.source_unit(), "pounds");
    }
}
