//! CSV writer.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use bodyprep_common::cell_text;
use polars::prelude::*;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// What a write produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// Writes a DataFrame to `path` as CSV, replacing any existing file.
///
/// Missing parent directories are created. A frame without columns
/// produces an empty file; a frame with columns but no rows produces just
/// the header.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<WriteSummary> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    write_csv_to(df, file, &path.display().to_string())?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote CSV"
    );

    Ok(WriteSummary {
        path: path.to_path_buf(),
        rows: df.height(),
        columns: df.width(),
    })
}

/// Writes a DataFrame as CSV to any writer.
///
/// `target` names the destination in error messages. Nulls are written as
/// empty fields and floats in their shortest round-trip form.
pub fn write_csv_to<W: Write>(df: &DataFrame, writer: W, target: &str) -> Result<()> {
    let write_err = |source| OutputError::Write {
        target: target.to_string(),
        source,
    };

    let mut csv_writer = csv::Writer::from_writer(writer);

    if df.width() > 0 {
        let header: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        csv_writer.write_record(&header).map_err(write_err)?;

        let columns = df.get_columns();
        let mut record: Vec<String> = Vec::with_capacity(columns.len());
        for row in 0..df.height() {
            record.clear();
            for column in columns {
                record.push(cell_text(&column.get(row)?).unwrap_or_default());
            }
            csv_writer.write_record(&record).map_err(write_err)?;
        }
    }

    csv_writer.flush().map_err(|source| OutputError::Flush {
        target: target.to_string(),
        source,
    })?;
    Ok(())
}
