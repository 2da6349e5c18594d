use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use saf_cli::pipeline::ConvertOutcome;
use saf_model::{RecordOutcome, ValidationReport};
use saf_pack::RenameSummary;

pub fn print_run_summary(outcome: &ConvertOutcome) {
    println!("Input: {}", outcome.spreadsheet.display());
    println!("Output: {}", outcome.output_dir.display());
    println!("Header row: {}", outcome.header_row);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Package"),
        header_cell("Copied"),
        header_cell("Missing"),
        header_cell("Missing Fields"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    for record in &outcome.run.outcomes {
        table.add_row(vec![
            Cell::new(record.package),
            count_cell(record.copied.len(), Color::Green),
            count_cell(record.missing_files.len(), Color::Yellow),
            missing_fields_cell(record),
            status_cell(record),
        ]);
    }
    let stats = outcome.run.stats;
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(stats.files_copied, Color::Green).add_attribute(Attribute::Bold),
        count_cell(stats.files_missing, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(format!(
            "{}/{} ok",
            stats.records_succeeded(),
            stats.records_processed
        ))
        .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    let failures: Vec<&RecordOutcome> = outcome
        .run
        .outcomes
        .iter()
        .filter(|record| !record.succeeded())
        .collect();
    if !failures.is_empty() {
        eprintln!("Failed records:");
        for record in failures {
            let message = record.failure.as_deref().unwrap_or("unknown failure");
            eprintln!("- package {}: {message}", record.package);
        }
    }
}

pub fn print_validation_summary(report: &ValidationReport) {
    if report.passed() {
        println!(
            "All {} package(s) passed validation.",
            report.packages_checked
        );
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Package"), header_cell("Issue")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for issue in &report.issues {
        table.add_row(vec![
            Cell::new(&issue.package),
            Cell::new(&issue.message).fg(Color::Red),
        ]);
    }
    println!("{table}");
    println!(
        "{} issue(s) across {} package(s).",
        report.issues.len(),
        report.packages_checked
    );
}

pub fn print_rename_summary(summary: &RenameSummary) {
    println!("Files renamed: {}", summary.renamed.len());
    if !summary.failures.is_empty() {
        eprintln!("Failed renames:");
        for failure in &summary.failures {
            eprintln!("- {failure}");
        }
    }
    println!("Rename log: {}", summary.log_path.display());
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn missing_fields_cell(record: &RecordOutcome) -> Cell {
    if record.missing_fields.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(record.missing_fields.join(", ")).fg(Color::Yellow)
    }
}

fn status_cell(record: &RecordOutcome) -> Cell {
    if record.succeeded() {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("error")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
