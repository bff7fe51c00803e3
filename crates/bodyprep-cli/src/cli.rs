//! CLI argument definitions for the bodyprep ETL job.

use std::path::PathBuf;

use bodyprep_model::PipelineConfig;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bodyprep",
    version,
    about = "Biometric ETL - normalize height/weight records to SI units",
    long_about = "Extract biometric records from CSV, JSON and XML files, normalize\n\
                  their column names, convert height to meters and weight to\n\
                  kilograms, and write one combined CSV file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file (flags override its values).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Adjust console verbosity (progress by default, -v for debug, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit console log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Console log format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the extract, transform and load job.
    Run(RunArgs),

    /// Print BMI statistics for a transformed output file.
    Report(ReportArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Glob pattern of input files (default: ./unzipped_folder/*).
    #[arg(long = "input", short = 'i', value_name = "PATTERN")]
    pub input: Option<String>,

    /// Output CSV file (default: transformed_data.csv).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Append-only run log (default: log_file.txt).
    #[arg(long = "run-log", value_name = "PATH")]
    pub run_log: Option<PathBuf>,

    /// Meters per inch applied to Height.
    #[arg(long = "inches-to-meters", value_name = "FACTOR")]
    pub inches_to_meters: Option<f64>,

    /// Kilograms per pound applied to Weight.
    #[arg(long = "pounds-to-kilograms", value_name = "FACTOR")]
    pub pounds_to_kilograms: Option<f64>,
}

impl RunArgs {
    /// Layers the flags that were given over a base configuration.
    pub fn apply_to(&self, mut config: PipelineConfig) -> PipelineConfig {
        if let Some(input) = &self.input {
            config = config.with_input_pattern(input.clone());
        }
        if let Some(output) = &self.output {
            config = config.with_output_path(output.clone());
        }
        if let Some(run_log) = &self.run_log {
            config = config.with_log_path(run_log.clone());
        }
        if let Some(factor) = self.inches_to_meters {
            config.units.inches_to_meters = factor;
        }
        if let Some(factor) = self.pounds_to_kilograms {
            config.units.pounds_to_kilograms = factor;
        }
        config
    }
}

#[derive(Parser)]
pub struct ReportArgs {
    /// Transformed CSV file (default: the configured output path).
    #[arg(value_name = "CSV")]
    pub csv: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
