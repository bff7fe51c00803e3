//! Shared utilities for the bodyprep crates.
//!
//! Every pipeline stage reads cells out of Polars frames; the helpers here
//! keep the rendering and parsing of those cells consistent between the
//! extractor, the transformer and the loader.

pub mod cells;

pub use cells::{cell_number, cell_text, format_float, non_blank_text, parse_number};
