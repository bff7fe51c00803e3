//! Extraction stage of the bodyprep pipeline.
//!
//! This crate turns a glob pattern into one normalized Polars DataFrame.
//!
//! # Features
//!
//! - **Discovery**: Expand the input glob into candidate files
//! - **Format dispatch**: Delimited text, JSON (line-delimited or whole
//!   document) and XML, chosen by extension
//! - **Column normalization**: Map height/weight variants to canonical
//!   names, title-case everything else
//! - **Aggregation**: Union of all readable files, one failure per bad file
//!
//! # Example
//!
//! ```ignore
//! use bodyprep_ingest::Extractor;
//! use bodyprep_model::PipelineConfig;
//!
//! let config = PipelineConfig::default().with_input_pattern("data/*");
//! let extraction = Extractor::from_config(&config).extract()?;
//! println!("{} rows, {} failed files", extraction.row_count(), extraction.failures.len());
//! ```

mod columns;
mod discovery;
mod error;
mod extract;
mod readers;
mod records;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{SourceFormat, discover_sources};

// === Readers ===
pub use readers::{read_delimited, read_json, read_source, read_xml};

// === Column Normalization ===
pub use columns::{normalize_columns, normalized_name, title_case};

// === Extraction ===
pub use extract::{
    Extraction, Extractor, FileFailure, LoadedFile, SkipReason, SkippedFile, union_frames,
};
