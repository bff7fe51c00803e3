//! Transformation stage of the bodyprep pipeline.
//!
//! Converts the canonical `Height` and `Weight` columns from inches and
//! pounds to meters and kilograms. Values that are not numbers become null.
//! Every other column is left alone.

mod coerce;
mod convert;
mod error;

pub use coerce::coerce_numeric;
pub use convert::{ConversionOutcome, TransformReport, Transformer, transform};
pub use error::{Result, TransformError};
