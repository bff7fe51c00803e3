//! Seams between the pipeline and the outside world.
//!
//! The pipeline reads its table from a [`RecordSource`] and hands the
//! transformed table to a [`RecordSink`]. Production runs use the glob
//! extractor and the CSV writer; tests can swap in the in-memory versions.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bodyprep_ingest::{Extraction, Extractor};
use bodyprep_model::PipelineConfig;
use bodyprep_output::write_csv;
use polars::prelude::DataFrame;

/// Produces the extracted table for a run.
pub trait RecordSource {
    /// Human-readable description of where records come from.
    fn describe(&self) -> String;

    fn extract(&self) -> Result<Extraction>;
}

/// Persists the final table.
pub trait RecordSink {
    /// Human-readable description of where records go.
    fn target(&self) -> String;

    fn load(&mut self, data: &DataFrame) -> Result<()>;
}

/// Files matched by a glob pattern.
#[derive(Debug, Clone)]
pub struct GlobSource {
    extractor: Extractor,
}

impl GlobSource {
    pub fn new(extractor: Extractor) -> Self {
        Self { extractor }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(Extractor::from_config(config))
    }
}

impl RecordSource for GlobSource {
    fn describe(&self) -> String {
        self.extractor.pattern().to_string()
    }

    fn extract(&self) -> Result<Extraction> {
        self.extractor
            .extract()
            .with_context(|| format!("extract {}", self.extractor.pattern()))
    }
}

/// A CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.output_path.clone())
    }
}

impl RecordSink for CsvFileSink {
    fn target(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&mut self, data: &DataFrame) -> Result<()> {
        write_csv(data, &self.path).with_context(|| format!("write {}", self.path.display()))?;
        Ok(())
    }
}

/// A fixed, already-normalized table.
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: DataFrame,
}

impl MemorySource {
    pub fn new(data: DataFrame) -> Self {
        Self { data }
    }
}

impl RecordSource for MemorySource {
    fn describe(&self) -> String {
        "<memory>".to_string()
    }

    fn extract(&self) -> Result<Extraction> {
        let mut extraction = Extraction::empty();
        extraction.data = self.data.clone();
        Ok(extraction)
    }
}

/// Keeps the loaded table in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub data: Option<DataFrame>,
}

impl RecordSink for MemorySink {
    fn target(&self) -> String {
        "<memory>".to_string()
    }

    fn load(&mut self, data: &DataFrame) -> Result<()> {
        self.data = Some(data.clone());
        Ok(())
    }
}
