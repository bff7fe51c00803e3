//! Loading stage of the bodyprep pipeline.
//!
//! Writes the final table as comma-delimited text: a header row of column
//! names, one line per record, no index column.

mod common;
mod delimited;
mod error;

pub use common::ensure_parent_dir;
pub use delimited::{WriteSummary, write_csv, write_csv_to};
pub use error::{OutputError, Result};
