//! CLI library components for the bodyprep ETL job.

pub mod logging;
pub mod pipeline;
pub mod ports;
pub mod report;
