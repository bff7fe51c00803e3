use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bodyprep_cli::pipeline::RunResult;
use bodyprep_cli::report::BmiReport;
use bodyprep_common::format_float;
use bodyprep_transform::ConversionOutcome;

pub fn print_run_summary(result: &RunResult) {
    println!("Input: {}", result.source);
    println!("Output: {}", result.target);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Format"),
        header_cell("Rows"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    for file in &result.loaded {
        table.add_row(vec![
            Cell::new(file.path.display()),
            Cell::new(file.format),
            Cell::new(file.rows),
            Cell::new("loaded").fg(Color::Green),
        ]);
    }
    for file in &result.skipped {
        table.add_row(vec![
            Cell::new(file.path.display()),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell(format!("skipped ({})", file.reason)),
        ]);
    }
    for failure in &result.failures {
        table.add_row(vec![
            Cell::new(failure.path.display()),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("failed")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(result.rows).add_attribute(Attribute::Bold),
        dim_cell(format!("{} columns", result.columns.len())),
    ]);
    println!("{table}");

    println!("Height: {}", outcome_text(result.transform.height));
    println!("Weight: {}", outcome_text(result.transform.weight));

    if result.has_failures() {
        eprintln!("Failed files:");
        for failure in &result.failures {
            eprintln!("- {}: {}", failure.path.display(), failure.error);
        }
    }
}

pub fn print_bmi_report(path: &Path, report: &BmiReport) {
    println!("Source: {}", path.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Category"),
        header_cell("BMI range"),
        header_cell("Count"),
        header_cell("Share"),
        header_cell("Mean BMI"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Mean height (m)"),
        header_cell("Mean weight (kg)"),
    ]);
    apply_table_style(&mut table);
    for index in 2..9 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for stats in &report.categories {
        let share = if report.measured == 0 {
            0.0
        } else {
            stats.count as f64 * 100.0 / report.measured as f64
        };
        table.add_row(vec![
            Cell::new(stats.category).add_attribute(Attribute::Bold),
            Cell::new(stats.category.range_label()),
            count_cell(stats.count),
            Cell::new(format!("{share:.1}%")),
            number_cell(stats.mean_bmi, 2),
            number_cell(stats.min_bmi, 2),
            number_cell(stats.max_bmi, 2),
            number_cell(stats.mean_height, 3),
            number_cell(stats.mean_weight, 2),
        ]);
    }
    println!("{table}");

    if report.unmeasured() > 0 {
        println!(
            "{} of {} rows lack a usable height or weight",
            report.unmeasured(),
            report.rows
        );
    }
}

fn outcome_text(outcome: ConversionOutcome) -> String {
    match outcome {
        ConversionOutcome::Converted { converted, nulls } => {
            format!("converted {converted} values, {nulls} null")
        }
        ConversionOutcome::MissingColumn => "column not found".to_string(),
        ConversionOutcome::EmptyTable => "no data".to_string(),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn number_cell(value: Option<f64>, decimals: usize) -> Cell {
    match value {
        Some(value) => Cell::new(format_float(round_to(value, decimals))),
        None => dim_cell("-"),
    }
}

fn round_to(value: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
