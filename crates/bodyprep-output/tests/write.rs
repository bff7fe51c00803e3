//! Writing output files to disk.

use std::fs;

use bodyprep_output::{OutputError, write_csv};
use polars::prelude::*;
use tempfile::TempDir;

fn sample() -> DataFrame {
    DataFrame::new(vec![
        Series::new("Height".into(), &[1.778, 1.651]).into_column(),
        Series::new("Weight".into(), &[81.64656, 63.50288]).into_column(),
    ])
    .unwrap()
}

#[test]
fn writes_into_new_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out/nested/transformed.csv");

    let summary = write_csv(&sample(), &path).unwrap();

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.columns, 2);
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "Height,Weight\n1.778,81.64656\n1.651,63.50288\n");
}

#[test]
fn replaces_existing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transformed.csv");
    fs::write(&path, "stale contents that are longer than the new output\n").unwrap();

    write_csv(&sample(), &path).unwrap();

    assert!(fs::read_to_string(&path).unwrap().starts_with("Height,Weight\n"));
}

#[test]
fn empty_table_writes_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transformed.csv");

    write_csv(&DataFrame::empty(), &path).unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn unwritable_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "x").unwrap();

    let result = write_csv(&sample(), &blocker.join("out.csv"));

    assert!(matches!(
        result,
        Err(OutputError::CreateDir { .. } | OutputError::Create { .. })
    ));
}
