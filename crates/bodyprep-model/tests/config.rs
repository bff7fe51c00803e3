//! Tests for loading pipeline configuration from disk.

use std::fs;
use std::path::PathBuf;

use bodyprep_model::{CanonicalField, ConfigError, PipelineConfig};

#[test]
fn loads_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("bodyprep.toml");
    fs::write(
        &path,
        "input_pattern = \"raw/*\"\n\
         output_path = \"out/data.csv\"\n\
         log_path = \"out/run.log\"\n\
         [columns]\n\
         height = [\"stature\"]\n",
    )
    .expect("write config");

    let config = PipelineConfig::load(&path).expect("load config");
    assert_eq!(config.input_pattern, "raw/*");
    assert_eq!(config.output_path, PathBuf::from("out/data.csv"));
    assert_eq!(config.log_path, PathBuf::from("out/run.log"));
    assert_eq!(
        config.columns.resolve("Stature"),
        Some(CanonicalField::Height)
    );
    // weight aliases were not overridden
    assert_eq!(config.columns.resolve("lbs"), Some(CanonicalField::Weight));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let result = PipelineConfig::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn malformed_file_names_its_origin() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "input_pattern = [").expect("write config");

    let err = PipelineConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("broken.toml"));
}
