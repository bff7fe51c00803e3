//! The extraction loop: discovery, per-file reading, and aggregation.

use std::fmt;
use std::path::{Path, PathBuf};

use bodyprep_common::non_blank_text;
use bodyprep_model::{ColumnAliases, PipelineConfig};
use polars::prelude::*;
use tracing::{debug, info, warn};

use crate::columns::normalize_columns;
use crate::discovery::{SourceFormat, discover_sources};
use crate::error::{IngestError, Result};
use crate::readers::read_source;

/// A file that contributed rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub rows: usize,
}

/// Why a matched path was not read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The extension is not csv, json or xml.
    Unsupported,
    /// The path is a directory or other non-file.
    NotAFile,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unsupported => f.write_str("unsupported"),
            SkipReason::NotAFile => f.write_str("not a file"),
        }
    }
}

/// A matched path that was passed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// A file that could not be read or normalized.
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: IngestError,
}

/// Result of one extraction run.
#[derive(Debug)]
pub struct Extraction {
    /// Union of all loaded files, every column string-typed.
    pub data: DataFrame,
    /// Loaded files in discovery order.
    pub loaded: Vec<LoadedFile>,
    pub skipped: Vec<SkippedFile>,
    pub failures: Vec<FileFailure>,
}

impl Extraction {
    /// An extraction that matched nothing.
    pub fn empty() -> Self {
        Self {
            data: DataFrame::empty(),
            loaded: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.data.height()
    }

    /// Column names in output order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Number of paths the pattern matched.
    pub fn matched(&self) -> usize {
        self.loaded.len() + self.skipped.len() + self.failures.len()
    }
}

/// Reads every file matching a pattern into one normalized table.
#[derive(Debug, Clone)]
pub struct Extractor {
    pattern: String,
    aliases: ColumnAliases,
}

impl Extractor {
    pub fn new(pattern: impl Into<String>, aliases: ColumnAliases) -> Self {
        Self {
            pattern: pattern.into(),
            aliases,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.input_pattern.clone(), config.columns.clone())
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Discovers and reads all matching files.
    ///
    /// Only discovery errors are returned. Files that fail to read are
    /// logged and listed in [`Extraction::failures`].
    pub fn extract(&self) -> Result<Extraction> {
        info!(pattern = %self.pattern, "Extraction started");

        let paths = discover_sources(&self.pattern)?;
        if paths.is_empty() {
            warn!("No files found for pattern {}", self.pattern);
            return Ok(Extraction::empty());
        }

        let extraction = self.extract_paths(&paths)?;
        info!("Extraction completed");
        info!("Columns after extract: {:?}", extraction.column_names());
        Ok(extraction)
    }

    /// Reads the given paths in order and concatenates what loads.
    pub fn extract_paths(&self, paths: &[PathBuf]) -> Result<Extraction> {
        let mut frames = Vec::new();
        let mut extraction = Extraction::empty();

        for path in paths {
            if !path.is_file() {
                info!("Skipped (not a file): {}", path.display());
                extraction.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: SkipReason::NotAFile,
                });
                continue;
            }

            let Some(format) = SourceFormat::from_path(path) else {
                info!("Skipped (unsupported): {}", path.display());
                extraction.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: SkipReason::Unsupported,
                });
                continue;
            };

            match self.read_file(path, format) {
                Ok(df) => {
                    let rows = df.height();
                    info!("Extracted {rows} rows from {}", display_name(path));
                    extraction.loaded.push(LoadedFile {
                        path: path.clone(),
                        format,
                        rows,
                    });
                    frames.push(df);
                }
                Err(error) => {
                    warn!("Failed to read {}: {error}", path.display());
                    extraction.failures.push(FileFailure {
                        path: path.clone(),
                        error,
                    });
                }
            }
        }

        extraction.data = union_frames(&frames)?;
        debug!(
            rows = extraction.data.height(),
            columns = extraction.data.width(),
            loaded = extraction.loaded.len(),
            skipped = extraction.skipped.len(),
            failed = extraction.failures.len(),
            "combined extracted frames"
        );
        Ok(extraction)
    }

    /// Reads one file and normalizes its column names.
    pub fn read_file(&self, path: &Path, format: SourceFormat) -> Result<DataFrame> {
        let raw = read_source(path, format)?;
        normalize_columns(&raw, &self.aliases)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Concatenates frames by column union.
///
/// Columns keep their first-seen order. Rows from a frame that lacks a
/// column are null there, and a frame without columns still contributes
/// its rows. Every output column is string-typed, with blank cells folded
/// to null.
pub fn union_frames(frames: &[DataFrame]) -> Result<DataFrame> {
    let mut names: Vec<String> = Vec::new();
    for frame in frames {
        for name in frame.get_column_names() {
            if !names.iter().any(|seen| seen == name.as_str()) {
                names.push(name.to_string());
            }
        }
    }

    let total_rows: usize = frames.iter().map(DataFrame::height).sum();
    let mut columns = Vec::with_capacity(names.len());

    for name in &names {
        let mut values: Vec<Option<String>> = Vec::with_capacity(total_rows);
        for frame in frames {
            match frame.column(name).ok() {
                Some(column) => {
                    for idx in 0..column.len() {
                        values.push(non_blank_text(&column.get(idx)?));
                    }
                }
                None => values.extend(std::iter::repeat_n(None, frame.height())),
            }
        }
        columns.push(Series::new(name.as_str().into(), values).into_column());
    }

    Ok(DataFrame::new_with_height(total_rows, columns)?)
}
