//! Reading templates and footnotes back from XLSX files written by the sink.

use std::path::Path;

use ashe_model::{Category, Cell, Fill, StyledCell};
use ashe_output::{
    FOOTNOTE_LINES, FootnoteSource, OutputError, Sheet, TemplateSource, Workbook, WorkbookSink,
    XlsxFootnotes, XlsxSink, XlsxTemplates, read_template, save_xlsx,
};
use calamine::{Data, Reader, Xlsx, open_workbook};
use tempfile::TempDir;

fn text(value: &str) -> StyledCell {
    StyledCell::plain(Cell::Text(value.to_string()))
}

fn number(value: f64) -> StyledCell {
    StyledCell::plain(Cell::Number(value))
}

/// A source tab: header row, then `(code, order)` rows in columns A and C.
fn source_tab(name: &str, rows: &[(&str, Option<f64>)]) -> Sheet {
    let mut sheet = Sheet::new(name);
    sheet.set(0, 0, text("Code"));
    sheet.set(0, 1, text("Description"));
    sheet.set(0, 2, text("Order"));
    for (row, (code, order)) in (1u32..).zip(rows) {
        sheet.set(row, 0, text(code));
        sheet.set(row, 1, text(&format!("{code} description")));
        if let Some(order) = order {
            sheet.set(row, 2, number(*order));
        }
    }
    sheet
}

fn category_tabs() -> Vec<Sheet> {
    Category::ALL
        .iter()
        .map(|category| {
            let mut sheet = Sheet::new(category.sheet_name());
            sheet.set(3, 2, text("Number of jobs"));
            sheet
        })
        .collect()
}

fn write_template(dir: &Path, file: &str, sources: Vec<Sheet>) {
    let mut sheets = category_tabs();
    sheets.extend(sources);
    save_xlsx(&Workbook::new(sheets), &dir.join(file)).unwrap();
}

#[test]
fn template_order_and_tabs() {
    let dir = TempDir::new().unwrap();
    write_template(
        dir.path(),
        "Testtable template.xlsx",
        vec![source_tab(
            "testtable",
            &[("A", Some(1.0)), ("B", Some(2.0)), ("C", Some(3.0)), ("note", None)],
        )],
    );

    let table = ashe_model::table("Table test - Test data").unwrap();
    let template = XlsxTemplates::new(dir.path()).load(table).unwrap();

    assert_eq!(template.order.len(), 3);
    assert_eq!(template.order.get("testtable A"), Some(1));
    assert_eq!(template.order.get("testtable C"), Some(3));
    assert!(!template.order.contains("testtable note"));
    assert_eq!(template.max_order(), 3);

    let names: Vec<_> = template.sheet_names().collect();
    assert_eq!(names.len(), 10);
    assert_eq!(names[0], "All");
    assert_eq!(names[9], "testtable");

    let seeded = template.seed();
    let all = seeded.sheet("All").unwrap();
    assert_eq!(
        all.get(3, 2).map(|cell| cell.value.clone()),
        Some(Cell::Text("Number of jobs".into()))
    );
}

#[test]
fn later_sources_override_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("t.xlsx");
    let mut sheets = category_tabs();
    sheets.push(source_tab("occ1", &[("1", Some(1.0)), ("11", Some(2.0))]));
    sheets.push(source_tab("occ2", &[("11", Some(3.0))]));
    save_xlsx(&Workbook::new(sheets), &path).unwrap();

    let template = read_template(&path, &["occ1", "occ2"]).unwrap();
    assert_eq!(template.order.get("occ1 1"), Some(1));
    assert_eq!(template.order.get("occ1 11"), Some(2));
    assert_eq!(template.order.get("occ2 11"), Some(3));
}

#[test]
fn missing_source_tab_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("t.xlsx");
    save_xlsx(&Workbook::new(category_tabs()), &path).unwrap();

    let err = read_template(&path, &["occ1"]).unwrap_err();
    assert!(matches!(err, OutputError::SheetMissing { ref sheet, .. } if sheet == "occ1"));
}

#[test]
fn footnotes_by_variable_group() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Footnotes template.xlsx");
    let sheets = (1..=4)
        .map(|group| {
            let mut sheet = Sheet::new(format!("FootNotes{group}"));
            sheet.set(0, 0, text("Footnote"));
            for line in 1..=7u32 {
                sheet.set(line, 0, text(&format!("group {group} line {line}")));
            }
            sheet
        })
        .collect();
    save_xlsx(&Workbook::new(sheets), &path).unwrap();

    let footnotes = XlsxFootnotes::open(&path).unwrap();
    let gross = ashe_model::variable("Annual pay - Gross").unwrap();
    let lines = footnotes.footnotes(gross).unwrap();
    assert_eq!(lines.len(), FOOTNOTE_LINES);
    assert_eq!(lines[0], "group 2 line 1");

    let basic = ashe_model::variable("Basic Pay - Including other pay").unwrap();
    assert_eq!(footnotes.footnotes(basic).unwrap()[5], "group 1 line 6");
}

#[test]
fn sink_writes_values_and_fills() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("out.xlsx");
    let mut sheet = Sheet::new("All");
    sheet.write_title("Table test.3b Basic Pay - Including other pay");
    sheet.write_rows(&[vec![
        StyledCell {
            value: Cell::Number(7.5),
            fill: Fill::Light,
        },
        StyledCell {
            value: Cell::Suppressed,
            fill: Fill::Dark,
        },
        StyledCell {
            value: Cell::Empty,
            fill: Fill::Dark,
        },
    ]]);

    XlsxSink.write(&path, &Workbook::new(vec![sheet])).unwrap();

    let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
    let range = workbook.worksheet_range("All").unwrap();
    assert_eq!(
        range.get_value((0, 0)),
        Some(&Data::String("Table test.3b Basic Pay - Including other pay".into()))
    );
    assert_eq!(range.get_value((5, 2)), Some(&Data::Float(7.5)));
    assert_eq!(range.get_value((5, 3)), Some(&Data::String("x".into())));
}
