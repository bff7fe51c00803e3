//! Row-oriented staging for the JSON and XML readers.

use polars::prelude::*;

use crate::error::Result;

/// One source record: `(field name, cell)` pairs in document order.
///
/// A name may repeat; the last occurrence wins when the frame is built.
pub(crate) type Record = Vec<(String, Option<String>)>;

/// Builds a string-typed DataFrame from records.
///
/// Columns appear in first-seen order across all records. A record that
/// lacks a column contributes a null to it. The frame has one row per
/// record, even when no record has any field.
pub(crate) fn records_to_frame(records: &[Record]) -> Result<DataFrame> {
    let mut names: Vec<&str> = Vec::new();
    for record in records {
        for (name, _) in record {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
    }

    let columns = names
        .iter()
        .map(|name| {
            let values: Vec<Option<String>> = records
                .iter()
                .map(|record| {
                    record
                        .iter()
                        .rev()
                        .find(|(key, _)| key == name)
                        .and_then(|(_, value)| value.clone())
                })
                .collect();
            Series::new((*name).into(), values).into_column()
        })
        .collect::<Vec<_>>();

    Ok(DataFrame::new_with_height(records.len(), columns)?)
}
