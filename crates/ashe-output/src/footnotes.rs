//! Footnote lookup.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ashe_model::VariableSpec;
use calamine::{Data, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::error::{OutputError, Result};

/// Lines written under every table.
pub const FOOTNOTE_LINES: usize = 6;
/// File name of the footnote workbook inside the template directory.
pub const FOOTNOTE_WORKBOOK: &str = "Footnotes template.xlsx";

const FOOTNOTE_GROUPS: [u8; 4] = [1, 2, 3, 4];
const FOOTNOTE_HEADER: &str = "Footnote";

/// Supplies the footnote block for a variable.
pub trait FootnoteSource {
    fn footnotes(&self, variable: &VariableSpec) -> Result<Vec<String>>;
}

/// Footnotes read from the `FootNotes1`..`FootNotes4` sheets of one workbook.
#[derive(Debug, Clone)]
pub struct XlsxFootnotes {
    path: PathBuf,
    groups: BTreeMap<u8, Vec<String>>,
}

impl XlsxFootnotes {
    pub fn open(path: &Path) -> Result<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| OutputError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut groups = BTreeMap::new();
        for group in FOOTNOTE_GROUPS {
            let sheet = format!("FootNotes{group}");
            if !workbook.sheet_names().iter().any(|name| *name == sheet) {
                return Err(OutputError::SheetMissing {
                    path: path.to_path_buf(),
                    sheet,
                });
            }
            let range = workbook
                .worksheet_range(&sheet)
                .map_err(|source| OutputError::SheetRead {
                    path: path.to_path_buf(),
                    sheet: sheet.clone(),
                    source,
                })?;
            let lines = footnote_column(path, &sheet, range.rows())?;
            debug!(path = %path.display(), sheet = %sheet, "read footnotes");
            groups.insert(group, lines);
        }

        Ok(Self {
            path: path.to_path_buf(),
            groups,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FootnoteSource for XlsxFootnotes {
    fn footnotes(&self, variable: &VariableSpec) -> Result<Vec<String>> {
        self.groups
            .get(&variable.footnote_group)
            .cloned()
            .ok_or_else(|| OutputError::SheetMissing {
                path: self.path.clone(),
                sheet: format!("FootNotes{}", variable.footnote_group),
            })
    }
}

/// Takes the first [`FOOTNOTE_LINES`] entries under the `Footnote` header.
fn footnote_column<'a>(
    path: &Path,
    sheet: &str,
    mut rows: impl Iterator<Item = &'a [Data]>,
) -> Result<Vec<String>> {
    let column = rows
        .next()
        .and_then(|header| {
            header
                .iter()
                .position(|cell| matches!(cell, Data::String(text) if text.trim() == FOOTNOTE_HEADER))
        })
        .ok_or_else(|| OutputError::ColumnMissing {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
            column: FOOTNOTE_HEADER.to_string(),
        })?;

    let lines: Vec<String> = rows
        .take(FOOTNOTE_LINES)
        .map(|row| match row.get(column) {
            Some(Data::Empty) | None => String::new(),
            Some(data) => data.to_string(),
        })
        .collect();

    if lines.len() < FOOTNOTE_LINES {
        return Err(OutputError::FootnotesShort {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
            found: lines.len(),
            expected: FOOTNOTE_LINES,
        });
    }
    Ok(lines)
}

/// Fixed footnotes, keyed by group.
#[derive(Debug, Clone, Default)]
pub struct StaticFootnotes {
    groups: BTreeMap<u8, Vec<String>>,
}

impl StaticFootnotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: u8, lines: Vec<String>) -> Self {
        self.groups.insert(group, lines);
        self
    }
}

impl FootnoteSource for StaticFootnotes {
    fn footnotes(&self, variable: &VariableSpec) -> Result<Vec<String>> {
        Ok(self
            .groups
            .get(&variable.footnote_group)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Data {
        Data::String(value.to_string())
    }

    #[test]
    fn reads_six_lines_under_the_header() {
        let rows: Vec<Vec<Data>> = std::iter::once(vec![text("Id"), text("Footnote")])
            .chain((1..=8).map(|i| vec![Data::Float(f64::from(i)), text(&format!("note {i}"))]))
            .collect();
        let lines =
            footnote_column(Path::new("f.xlsx"), "FootNotes1", rows.iter().map(Vec::as_slice))
                .unwrap();
        assert_eq!(lines.len(), FOOTNOTE_LINES);
        assert_eq!(lines[0], "note 1");
        assert_eq!(lines[5], "note 6");
    }

    #[test]
    fn missing_header_is_an_error() {
        let rows = [vec![text("Notes")], vec![text("a")]];
        let err = footnote_column(Path::new("f.xlsx"), "FootNotes2", rows.iter().map(Vec::as_slice))
            .unwrap_err();
        assert!(matches!(err, OutputError::ColumnMissing { .. }));
    }

    #[test]
    fn short_sheet_is_an_error() {
        let rows = [vec![text("Footnote")], vec![text("only one")]];
        let err = footnote_column(Path::new("f.xlsx"), "FootNotes3", rows.iter().map(Vec::as_slice))
            .unwrap_err();
        assert!(matches!(err, OutputError::FootnotesShort { found: 1, .. }));
    }
}
