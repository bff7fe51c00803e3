//! bodyprep CLI.

use std::io::{self, IsTerminal};

use bodyprep_cli::logging::{LogConfig, LogFormat, init_logging};
use bodyprep_model::PipelineConfig;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{load_config, run_etl, run_report};
use crate::summary::{print_bmi_report, print_run_summary};

fn main() {
    std::process::exit(real_main());
}

/// Runs the CLI and returns the exit code.
///
/// `process::exit` skips destructors, so the run log guard must be dropped
/// in here.
fn real_main() -> i32 {
    let cli = Cli::parse();
    cli.color.write_global();

    let base = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("error: {error:#}");
            return 1;
        }
    };
    let config = match &cli.command {
        Command::Run(args) => args.apply_to(base),
        Command::Report(_) => base,
    };

    let log_config = log_config_from_cli(&cli, &config);
    let run_log = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("error: failed to initialize logging: {error}");
            return 1;
        }
    };

    match &cli.command {
        Command::Run(_) => match run_etl(&config, &run_log.health()) {
            Ok(result) => {
                print_run_summary(&result);
                match run_log.finish() {
                    Ok(()) => 0,
                    Err(error) => {
                        eprintln!("error: cannot write run log: {error}");
                        1
                    }
                }
            }
            Err(error) => {
                tracing::error!("ETL Job Failed: {error:#}");
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Report(args) => {
            let path = args.csv.clone().unwrap_or_else(|| config.output_path.clone());
            match run_report(&path) {
                Ok((path, report)) => {
                    print_bmi_report(&path, &report);
                    0
                }
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli, config: &PipelineConfig) -> LogConfig {
    let mut log_config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    log_config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        log_config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    log_config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    log_config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => io::stderr().is_terminal(),
    };
    if matches!(cli.command, Command::Run(_)) {
        log_config.run_log = Some(config.log_path.clone());
    }
    log_config
}
