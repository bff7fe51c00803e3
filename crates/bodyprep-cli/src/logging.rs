//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Two sinks are installed:
//!
//! - the **console** on stderr, in `pretty`, `compact` or `json` form, at
//!   the level chosen by `-v`/`-q`, `--log-level` or `RUST_LOG`
//! - the **run log**, an append-only text file that receives every event
//!   at INFO and above as `<YYYY-MM-DD HH:MM:SS> - <message>`
//!
//! The run log file is opened once per run and every event is flushed as
//! soon as it is written. The [`RunLogGuard`] returned by [`init_logging`]
//! flushes once more when dropped.
//!
//! # Log Levels
//!
//! - `error`: fatal run failures
//! - `warn`: files that could not be read, empty input patterns
//! - `info`: stage progress, per-file row counts, conversions
//! - `debug`: state transitions, per-frame shapes
//! - `trace`: unused
//!
//! # Usage
//!
//! ```ignore
//! use bodyprep_cli::logging::{LogConfig, init_logging};
//!
//! let config = LogConfig::default().with_run_log(Some("log_file.txt".into()));
//! let _guard = init_logging(&config)?;
//! ```

use std::fmt as std_fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Timestamp layout of run log lines.
pub const RUN_LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Console level filter.
    pub level_filter: LevelFilter,
    /// Let `RUST_LOG` override `level_filter` when set.
    pub use_env_filter: bool,
    /// Whether to include target (module path) in console output.
    pub with_target: bool,
    /// Whether to use ANSI colors on the console.
    pub with_ansi: bool,
    /// Console output format.
    pub format: LogFormat,
    /// Run log file. No run log is written when `None`.
    pub run_log: Option<PathBuf>,
}

/// Console output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors.
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON format for machine parsing.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_target: false,
            with_ansi: true,
            format: LogFormat::default(),
            run_log: None,
        }
    }
}

impl LogConfig {
    /// Set the console level directly.
    #[must_use]
    pub fn with_level_filter(mut self, level: LevelFilter) -> Self {
        self.level_filter = level;
        self
    }

    /// Enable or disable ANSI colors.
    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    /// Set console output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the run log path.
    #[must_use]
    pub fn with_run_log(mut self, path: Option<PathBuf>) -> Self {
        self.run_log = path;
        self
    }
}

/// Initialize the global tracing subscriber with the given configuration.
///
/// This should be called once at application startup. Keep the returned
/// guard alive until the run ends.
///
/// # Errors
///
/// Returns an error if the run log cannot be opened or a global subscriber
/// is already installed.
pub fn init_logging(config: &LogConfig) -> io::Result<RunLogGuard> {
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = vec![console_layer(config)];

    let guard = match &config.run_log {
        Some(path) => {
            let writer = RunLogWriter::open(path)?;
            layers.push(run_log_layer(writer.clone()).boxed());
            RunLogGuard::new(writer)
        }
        None => RunLogGuard::disabled(),
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(io::Error::other)?;
    Ok(guard)
}

fn console_layer(config: &LogConfig) -> Box<dyn Layer<Registry> + Send + Sync> {
    let filter = build_env_filter(config);

    match config.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_target(config.with_target)
            .with_filter(filter)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(io::stderr)
            .with_ansi(config.with_ansi)
            .with_target(config.with_target)
            .without_time()
            .with_filter(filter)
            .boxed(),
        LogFormat::Pretty => fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(config.with_ansi)
            .with_target(config.with_target)
            .without_time()
            .with_filter(filter)
            .boxed(),
    }
}

/// Layer that writes run log lines at INFO and above.
pub fn run_log_layer<S>(writer: RunLogWriter) -> impl Layer<S> + Send + Sync + 'static
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .event_format(RunLogFormat)
        .with_writer(writer)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO)
}

/// Build an `EnvFilter` from the configured level, optionally deferring to
/// `RUST_LOG`.
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let level = config.level_filter.to_string().to_lowercase();
    let default_filter = || {
        // External crates stay at warn level to reduce noise
        EnvFilter::new(format!(
            "warn,bodyprep_cli={level},bodyprep_common={level},bodyprep_ingest={level},\
             bodyprep_model={level},bodyprep_output={level},bodyprep_transform={level}"
        ))
    };

    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter())
    } else {
        default_filter()
    }
}

/// Event formatter for run log lines.
///
/// Output: `2024-05-01 09:30:00 - Extracted 3 rows from people.csv`,
/// followed by any structured fields as ` key=value`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLogFormat;

impl<S, N> FormatEvent<S, N> for RunLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std_fmt::Result {
        let mut visitor = RunLogVisitor::default();
        event.record(&mut visitor);

        write!(
            writer,
            "{} - {}",
            Local::now().format(RUN_LOG_TIMESTAMP_FORMAT),
            visitor.message
        )?;
        for (name, value) in &visitor.fields {
            write!(writer, " {name}={value}")?;
        }
        writeln!(writer)
    }
}

#[derive(Default)]
struct RunLogVisitor {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl RunLogVisitor {
    fn push(&mut self, field: &Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.fields.push((field.name(), value));
        }
    }
}

impl Visit for RunLogVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.push(field, value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std_fmt::Debug) {
        self.push(field, format!("{value:?}"));
    }
}

/// First write failure seen by the run log, if any.
///
/// The formatting layer drops writer errors, so the writer records them
/// here and the pipeline polls between stages.
#[derive(Debug, Clone, Default)]
pub struct RunLogHealth {
    failure: Arc<Mutex<Option<io::Error>>>,
}

impl RunLogHealth {
    /// Returns the recorded failure, if any, and clears it.
    pub fn check(&self) -> io::Result<()> {
        let mut slot = self
            .failure
            .lock()
            .map_err(|_| io::Error::other("run log lock poisoned"))?;
        match slot.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn record(&self, error: &io::Error) {
        if let Ok(mut slot) = self.failure.lock()
            && slot.is_none()
        {
            *slot = Some(io::Error::new(error.kind(), error.to_string()));
        }
    }
}

/// Append-only run log file shared by every event of a run.
#[derive(Clone)]
pub struct RunLogWriter {
    file: Arc<Mutex<File>>,
    health: RunLogHealth,
}

impl RunLogWriter {
    /// Opens `path` for appending, creating it and its parent directory.
    pub fn open(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::from_file(file))
    }

    /// Wraps an already open file.
    pub fn from_file(file: File) -> Self {
        Self {
            file: Arc::new(Mutex::new(file)),
            health: RunLogHealth::default(),
        }
    }

    /// Handle reporting write failures of this writer.
    pub fn health(&self) -> RunLogHealth {
        self.health.clone()
    }

    fn flush(&self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("run log lock poisoned"))?;
        guard.flush().inspect_err(|error| self.health.record(error))
    }
}

/// Per-event handle; each write is one complete line and is flushed.
pub struct RunLogLine {
    file: Arc<Mutex<File>>,
    health: RunLogHealth,
}

impl RunLogLine {
    fn append(&self, buf: &[u8]) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("run log lock poisoned"))?;
        guard.write_all(buf)?;
        guard.flush()
    }
}

impl Write for RunLogLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.append(buf)
            .inspect_err(|error| self.health.record(error))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("run log lock poisoned"))?;
        guard.flush().inspect_err(|error| self.health.record(error))
    }
}

impl<'a> MakeWriter<'a> for RunLogWriter {
    type Writer = RunLogLine;

    fn make_writer(&'a self) -> Self::Writer {
        RunLogLine {
            file: Arc::clone(&self.file),
            health: self.health.clone(),
        }
    }
}

/// Flushes the run log when dropped.
pub struct RunLogGuard {
    writer: Option<RunLogWriter>,
}

impl RunLogGuard {
    fn new(writer: RunLogWriter) -> Self {
        Self {
            writer: Some(writer),
        }
    }

    fn disabled() -> Self {
        Self { writer: None }
    }

    /// Whether a run log is being written.
    pub fn is_active(&self) -> bool {
        self.writer.is_some()
    }

    /// Write failures of the run log. Never fails when no run log is active.
    pub fn health(&self) -> RunLogHealth {
        self.writer
            .as_ref()
            .map(RunLogWriter::health)
            .unwrap_or_default()
    }

    /// Flushes the run log and reports any write failure seen so far.
    pub fn finish(&self) -> io::Result<()> {
        match &self.writer {
            Some(writer) => {
                writer.flush()?;
                writer.health.check()
            }
            None => Ok(()),
        }
    }
}

impl Drop for RunLogGuard {
    fn drop(&mut self) {
        if let Some(writer) = &self.writer
            && let Err(error) = writer.flush()
        {
            eprintln!("warning: failed to flush run log: {error}");
        }
    }
}
