//! Format-specific readers.
//!
//! Each reader takes a path and returns the file's rows as a DataFrame with
//! the source's own column names. Normalization happens afterwards.

mod delimited;
mod json;
mod xml;

use std::path::Path;

use polars::prelude::DataFrame;

use crate::discovery::SourceFormat;
use crate::error::Result;

pub use delimited::read_delimited;
pub use json::read_json;
pub use xml::read_xml;

/// Reads a file with the reader for its format.
pub fn read_source(path: &Path, format: SourceFormat) -> Result<DataFrame> {
    match format {
        SourceFormat::Csv => read_delimited(path),
        SourceFormat::Json => read_json(path),
        SourceFormat::Xml => read_xml(path),
    }
}
