use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use crate::types::{JobOutcome, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("Year: {}", result.year);
    println!("Output: {}", result.output_dir.display());
    if result.dry_run {
        println!("Dry run: nothing was written");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Variable"),
        header_cell("Status"),
        header_cell("Files"),
        header_cell("Warnings"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);

    let mut total_files = 0usize;
    let mut total_warnings = 0usize;
    let mut failed = 0usize;
    for job in &result.jobs {
        let (files, warnings) = match &job.report {
            Ok(report) => (Some(report.files.len()), Some(report.warnings.len())),
            Err(_) => (None, None),
        };
        total_files += files.unwrap_or(0);
        total_warnings += warnings.unwrap_or(0);
        if job.report.is_err() {
            failed += 1;
        }
        table.add_row(vec![
            Cell::new(job.table).fg(Color::Blue).add_attribute(Attribute::Bold),
            Cell::new(job.variable),
            status_cell(job),
            count_cell(files, Color::Green),
            count_cell(warnings, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} jobs", result.jobs.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(Some(failed), Color::Red).add_attribute(Attribute::Bold),
        Cell::new(total_files).add_attribute(Attribute::Bold),
        count_cell(Some(total_warnings), Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_warning_table(result);

    let errors: Vec<&JobOutcome> = result.jobs.iter().filter(|job| job.report.is_err()).collect();
    if !errors.is_empty() {
        eprintln!("Errors:");
        for job in errors {
            if let Err(error) = &job.report {
                eprintln!("- {} / {}: {error}", job.table, job.variable);
            }
        }
    }
}

fn print_warning_table(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Variable"),
        header_cell("Warning"),
    ]);
    apply_table_style(&mut table);
    let mut any = false;
    for job in &result.jobs {
        let Ok(report) = &job.report else {
            continue;
        };
        for warning in &report.warnings {
            any = true;
            table.add_row(vec![
                Cell::new(job.table),
                Cell::new(job.variable),
                Cell::new(warning.to_string()).fg(Color::Yellow),
            ]);
        }
    }
    if any {
        println!();
        println!("Warnings:");
        println!("{table}");
    }
}

fn status_cell(job: &JobOutcome) -> Cell {
    match &job.report {
        Ok(report) if report.has_warnings() => Cell::new("WARN").fg(Color::Yellow),
        Ok(_) => Cell::new("OK").fg(Color::Green).add_attribute(Attribute::Bold),
        Err(_) => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ]);
    }
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
