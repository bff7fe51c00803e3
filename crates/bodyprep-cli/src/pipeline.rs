//! The ETL run with explicit stages.
//!
//! The pipeline moves through these states in order, never branching or
//! going back:
//!
//! 1. **Idle**: nothing has happened yet
//! 2. **Extracting**: discover and read source files
//! 3. **Transforming**: convert height and weight to SI units
//! 4. **Loading**: write the output table
//! 5. **Done**
//!
//! A fatal error stops the run where it is. The error carries a
//! [`StageFailure`] naming the state, and nothing already written is
//! rolled back. A run log that can no longer be written is fatal too; it
//! is checked once per state.

use std::fmt;

use anyhow::{Context, Result};
use bodyprep_ingest::{Extraction, FileFailure, LoadedFile, SkippedFile};
use bodyprep_model::UnitConversion;
use bodyprep_transform::{TransformReport, transform};
use tracing::{debug, info};

use crate::logging::RunLogHealth;
use crate::ports::{RecordSink, RecordSource};

/// Where a run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineState {
    Idle,
    Extracting,
    Transforming,
    Loading,
    Done,
}

impl PipelineState {
    /// The state after this one. `Done` stays `Done`.
    pub fn next(self) -> Self {
        match self {
            Self::Idle => Self::Extracting,
            Self::Extracting => Self::Transforming,
            Self::Transforming => Self::Loading,
            Self::Loading | Self::Done => Self::Done,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Extracting => "extracting",
            Self::Transforming => "transforming",
            Self::Loading => "loading",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error context attached to a fatal failure.
///
/// Recover it with `error.downcast_ref::<StageFailure>()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageFailure {
    pub state: PipelineState,
}

impl fmt::Display for StageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pipeline failed while {}", self.state)
    }
}

/// Everything a completed run produced.
#[derive(Debug)]
pub struct RunResult {
    pub state: PipelineState,
    /// Where records came from.
    pub source: String,
    /// Where records went.
    pub target: String,
    pub loaded: Vec<LoadedFile>,
    pub skipped: Vec<SkippedFile>,
    pub failures: Vec<FileFailure>,
    pub rows: usize,
    pub columns: Vec<String>,
    pub transform: TransformReport,
}

impl RunResult {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

struct StateTracker {
    state: PipelineState,
}

impl StateTracker {
    fn new() -> Self {
        Self {
            state: PipelineState::Idle,
        }
    }

    fn advance(&mut self) -> PipelineState {
        let next = self.state.next();
        debug!(from = %self.state, to = %next, "pipeline state");
        self.state = next;
        next
    }

    fn failure(&self) -> StageFailure {
        StageFailure { state: self.state }
    }

    fn check_log(&self, log: &RunLogHealth) -> Result<()> {
        log.check()
            .context("cannot write run log")
            .context(self.failure())
    }
}

/// Runs extract, transform and load once, without a run log to watch.
pub fn run_pipeline(
    source: &dyn RecordSource,
    units: &UnitConversion,
    sink: &mut dyn RecordSink,
) -> Result<RunResult> {
    run_pipeline_with_log(source, units, sink, &RunLogHealth::default())
}

/// Runs extract, transform and load once, failing as soon as `log` reports
/// a write failure.
pub fn run_pipeline_with_log(
    source: &dyn RecordSource,
    units: &UnitConversion,
    sink: &mut dyn RecordSink,
    log: &RunLogHealth,
) -> Result<RunResult> {
    let mut tracker = StateTracker::new();
    info!("ETL Job Started");
    tracker.check_log(log)?;

    tracker.advance();
    let Extraction {
        mut data,
        loaded,
        skipped,
        failures,
    } = source.extract().context(tracker.failure())?;
    tracker.check_log(log)?;

    tracker.advance();
    let transform_report = transform(&mut data, units).context(tracker.failure())?;
    tracker.check_log(log)?;

    tracker.advance();
    let target = sink.target();
    info!("Loading started");
    sink.load(&data).context(tracker.failure())?;
    info!("Saved transformed data to {target}");
    info!("Loading completed");
    tracker.check_log(log)?;

    let state = tracker.advance();
    info!("ETL Job Completed");
    tracker.check_log(log)?;

    let columns = data
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    Ok(RunResult {
        state,
        source: source.describe(),
        target,
        loaded,
        skipped,
        failures,
        rows: data.height(),
        columns,
        transform: transform_report,
    })
}
