//! In-memory publication workbooks.
//!
//! A [`Workbook`] is seeded with the text and numbers of its template's
//! sheets, then overlaid with the title, data rows and footnotes. Nothing
//! touches disk until a [`crate::WorkbookSink`] writes it.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use ashe_model::{Cell, Fill, StyledCell};

/// Zero-based row of the first data row (sheet row 6).
pub const DATA_FIRST_ROW: u32 = 5;
/// Zero-based column of the first statistic (column C).
pub const DATA_FIRST_COL: u16 = 2;
/// Rows between the header block and the first canonical order.
pub const HEADER_ROWS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    pub name: String,
    cells: BTreeMap<(u32, u16), StyledCell>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, row: u32, col: u16, cell: StyledCell) {
        self.cells.insert((row, col), cell);
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&StyledCell> {
        self.cells.get(&(row, col))
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = ((u32, u16), &StyledCell)> {
        self.cells.iter().map(|(position, cell)| (*position, cell))
    }

    /// Writes the title into cell A1.
    pub fn write_title(&mut self, title: &str) {
        self.set(0, 0, StyledCell::plain(Cell::Text(title.to_string())));
    }

    /// Writes data rows from row 6, column C onward.
    pub fn write_rows(&mut self, rows: &[Vec<StyledCell>]) {
        for (row_offset, row) in (0u32..).zip(rows) {
            for (col_offset, cell) in (0u16..).zip(row) {
                self.set(
                    DATA_FIRST_ROW + row_offset,
                    DATA_FIRST_COL + col_offset,
                    cell.clone(),
                );
            }
        }
    }

    /// Writes footnotes in column A directly below the last canonical row.
    pub fn write_footnotes(&mut self, lines: &[String], max_order: u32) {
        let first = max_order + HEADER_ROWS;
        for (offset, line) in (0u32..).zip(lines) {
            self.set(first + offset, 0, StyledCell::plain(Cell::Text(line.clone())));
        }
    }

    /// Plain-text grid of the sheet: one line per used row, `|` between
    /// columns, `*` after a light cell and `#` after a dark one.
    pub fn render_text(&self) -> String {
        let Some(max_col) = self.cells.keys().map(|(_, col)| *col).max() else {
            return String::new();
        };
        let mut rows: BTreeMap<u32, Vec<String>> = BTreeMap::new();
        for ((row, col), cell) in &self.cells {
            let line = rows
                .entry(*row)
                .or_insert_with(|| vec![String::new(); usize::from(max_col) + 1]);
            let marker = match cell.fill {
                Fill::None => "",
                Fill::Light => "*",
                Fill::Dark => "#",
            };
            line[usize::from(*col)] = format!("{}{marker}", cell.value);
        }

        let mut out = String::new();
        for (row, cells) in rows {
            let text = cells.join(" | ");
            let _ = writeln!(out, "{:<3} | {}", row + 1, text.trim_end_matches([' ', '|']));
        }
        out
    }
}

/// A named collection of sheets, written as one file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|sheet| sheet.name == name)
    }

    /// Returns the sheet called `name`, appending an empty one if needed.
    pub fn sheet_or_insert(&mut self, name: &str) -> &mut Sheet {
        let index = match self.sheets.iter().position(|sheet| sheet.name == name) {
            Some(index) => index,
            None => {
                self.sheets.push(Sheet::new(name));
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[index]
    }

    /// Drops every sheet whose name is in `names`.
    pub fn remove_sheets(&mut self, names: &[&str]) {
        self.sheets.retain(|sheet| !names.contains(&sheet.name.as_str()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_offsets() {
        let mut sheet = Sheet::new("All");
        sheet.write_title("Table 2.3a Basic Pay - Including other pay");
        sheet.write_rows(&[vec![
            StyledCell::plain(Cell::Number(12.0)),
            StyledCell {
                value: Cell::Suppressed,
                fill: Fill::Dark,
            },
        ]]);
        sheet.write_footnotes(&["a".to_string(), "b".to_string()], 3);

        assert!(sheet.get(0, 0).is_some());
        assert_eq!(sheet.get(5, 2).map(|c| c.value.clone()), Some(Cell::Number(12.0)));
        assert_eq!(sheet.get(5, 3).map(|c| c.fill), Some(Fill::Dark));
        // max order 3: footnotes start at sheet row 9.
        assert_eq!(sheet.get(8, 0).map(|c| c.value.clone()), Some(Cell::Text("a".into())));
        assert_eq!(sheet.get(9, 0).map(|c| c.value.clone()), Some(Cell::Text("b".into())));
    }

    #[test]
    fn removes_named_sheets_only() {
        let mut workbook = Workbook::new(vec![Sheet::new("All"), Sheet::new("occ1")]);
        workbook.sheet_or_insert("Male");
        workbook.remove_sheets(&["occ1"]);
        let names: Vec<_> = workbook.sheets().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["All", "Male"]);
    }

    #[test]
    fn renders_text_grid() {
        let mut sheet = Sheet::new("All");
        sheet.write_title("T");
        sheet.write_rows(&[vec![
            StyledCell::plain(Cell::Number(1.5)),
            StyledCell {
                value: Cell::Number(7.0),
                fill: Fill::Light,
            },
        ]]);
        assert_eq!(sheet.render_text(), "1   | T\n6   |  |  | 1.5 | 7*\n");
    }
}
