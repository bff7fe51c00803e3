use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bodyprep_cli::logging::RunLogHealth;
use bodyprep_cli::pipeline::{RunResult, run_pipeline_with_log};
use bodyprep_cli::ports::{CsvFileSink, GlobSource};
use bodyprep_cli::report::{BmiReport, bmi_report, read_transformed};
use bodyprep_model::PipelineConfig;
use tracing::{debug, info_span};

/// Loads the base configuration: the given TOML file, or defaults.
pub fn load_config(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            let config = PipelineConfig::load(path)?;
            debug!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        None => Ok(PipelineConfig::default()),
    }
}

pub fn run_etl(config: &PipelineConfig, log: &RunLogHealth) -> Result<RunResult> {
    config.validate().context("invalid configuration")?;

    let span = info_span!("etl", input = %config.input_pattern);
    let _guard = span.enter();

    let source = GlobSource::from_config(config);
    let mut sink = CsvFileSink::from_config(config);
    run_pipeline_with_log(&source, &config.units, &mut sink, log)
}

pub fn run_report(path: &Path) -> Result<(PathBuf, BmiReport)> {
    let df = read_transformed(path)?;
    let report = bmi_report(&df).with_context(|| format!("report on {}", path.display()))?;
    Ok((path.to_path_buf(), report))
}
