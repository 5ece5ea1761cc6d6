//! Publication templates.
//!
//! A template workbook has one tab per employee category, already laid out
//! with headers, plus one tab per source shorthand listing the codes that
//! source contributes (column A) and their publication order (column C).

use std::path::{Path, PathBuf};

use ashe_model::{CanonicalOrder, Cell, StyledCell, TableSpec, prefixed_code};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use tracing::{debug, info};

use crate::error::{OutputError, Result};
use crate::workbook::{Sheet, Workbook};

const CODE_COLUMN: u32 = 0;
const ORDER_COLUMN: u32 = 2;

/// A loaded template: its canonical order and the seed content of every tab.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub path: PathBuf,
    pub order: CanonicalOrder,
    sheets: Vec<Sheet>,
}

impl Template {
    pub fn new(path: impl Into<PathBuf>, order: CanonicalOrder, sheets: Vec<Sheet>) -> Self {
        Self {
            path: path.into(),
            order,
            sheets,
        }
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str())
    }

    /// Highest publication order, zero for an empty canon.
    pub fn max_order(&self) -> u32 {
        self.order.max_order().unwrap_or(0)
    }

    /// A fresh workbook holding a copy of every template tab.
    pub fn seed(&self) -> Workbook {
        Workbook::new(self.sheets.clone())
    }
}

/// Supplies the template for a table.
pub trait TemplateSource {
    fn load(&self, table: &TableSpec) -> Result<Template>;
}

/// Reads templates from `<dir>/<table template file>`.
#[derive(Debug, Clone)]
pub struct XlsxTemplates {
    dir: PathBuf,
}

impl XlsxTemplates {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TemplateSource for XlsxTemplates {
    fn load(&self, table: &TableSpec) -> Result<Template> {
        read_template(&self.dir.join(table.template), table.sources)
    }
}

/// Reads a template workbook and builds the canonical order from the tabs
/// named in `sources`, in that order. A code listed by a later source takes
/// that source's order.
pub fn read_template(path: &Path, sources: &[&str]) -> Result<Template> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| OutputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let names = workbook.sheet_names().to_vec();

    let mut sheets = Vec::with_capacity(names.len());
    for name in &names {
        let range = read_range(&mut workbook, path, name)?;
        sheets.push(sheet_from_range(name, &range));
    }

    let mut order = CanonicalOrder::new();
    for shorthand in sources {
        if !names.iter().any(|name| name == shorthand) {
            return Err(OutputError::SheetMissing {
                path: path.to_path_buf(),
                sheet: (*shorthand).to_string(),
            });
        }
        let range = read_range(&mut workbook, path, shorthand)?;
        let before = order.len();
        read_order(&range, shorthand, &mut order);
        debug!(
            path = %path.display(),
            source = shorthand,
            codes = order.len() - before,
            "read template order"
        );
    }

    info!(
        path = %path.display(),
        sheets = sheets.len(),
        codes = order.len(),
        "loaded template"
    );
    Ok(Template::new(path, order, sheets))
}

fn read_range<R: std::io::Read + std::io::Seek>(
    workbook: &mut Xlsx<R>,
    path: &Path,
    sheet: &str,
) -> Result<Range<Data>> {
    workbook
        .worksheet_range(sheet)
        .map_err(|source| OutputError::SheetRead {
            path: path.to_path_buf(),
            sheet: sheet.to_string(),
            source,
        })
}

/// Absolute `(row, col)` positions of the cells in a range.
fn positioned(range: &Range<Data>) -> impl Iterator<Item = (u32, u32, &Data)> {
    let (first_row, first_col) = range.start().unwrap_or((0, 0));
    (first_row..).zip(range.rows()).flat_map(move |(row, cells)| {
        (first_col..)
            .zip(cells.iter())
            .map(move |(col, data)| (row, col, data))
    })
}

fn sheet_from_range(name: &str, range: &Range<Data>) -> Sheet {
    let mut sheet = Sheet::new(name);
    for (row, col, data) in positioned(range) {
        let Ok(col) = u16::try_from(col) else {
            continue;
        };
        if let Some(cell) = cell_from_data(data) {
            sheet.set(row, col, StyledCell::plain(cell));
        }
    }
    sheet
}

fn cell_from_data(data: &Data) -> Option<Cell> {
    let cell = match data {
        Data::Empty | Data::Error(_) => return None,
        Data::String(text) => Cell::from_symbol(text).unwrap_or_else(|| Cell::Text(text.clone())),
        Data::Float(value) => Cell::Number(*value),
        Data::Int(value) => Cell::Number(*value as f64),
        Data::Bool(value) => Cell::Text(value.to_string()),
        Data::DateTime(value) => Cell::Number(value.as_f64()),
        Data::DateTimeIso(text) | Data::DurationIso(text) => Cell::Text(text.clone()),
    };
    Some(cell)
}

fn read_order(range: &Range<Data>, shorthand: &str, order: &mut CanonicalOrder) {
    let mut codes = std::collections::BTreeMap::new();
    let mut positions = std::collections::BTreeMap::new();
    for (row, col, data) in positioned(range) {
        // Row 1 is the header.
        if row == 0 {
            continue;
        }
        match col {
            CODE_COLUMN => {
                if let Some(code) = code_text(data) {
                    codes.insert(row, code);
                }
            }
            ORDER_COLUMN => {
                if let Some(position) = order_value(data) {
                    positions.insert(row, position);
                }
            }
            _ => {}
        }
    }

    for (row, code) in codes {
        match positions.get(&row) {
            Some(&position) => order.insert(prefixed_code(shorthand, &code), position),
            None => debug!(source = shorthand, row = row + 1, code = %code, "template code without order"),
        }
    }
}

fn code_text(data: &Data) -> Option<String> {
    match data {
        Data::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Data::Float(value) if value.fract() == 0.0 => Some(format!("{value:.0}")),
        Data::Float(value) => Some(value.to_string()),
        Data::Int(value) => Some(value.to_string()),
        _ => None,
    }
}

fn order_value(data: &Data) -> Option<u32> {
    match data {
        Data::Float(value) if value.fract() == 0.0 && *value >= 0.0 && *value <= f64::from(u32::MAX) => {
            Some(*value as u32)
        }
        Data::Int(value) => u32::try_from(*value).ok(),
        Data::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_from_numbers_drop_the_fraction() {
        assert_eq!(code_text(&Data::Float(1115.0)).as_deref(), Some("1115"));
        assert_eq!(code_text(&Data::String(" 11 ".into())).as_deref(), Some("11"));
        assert_eq!(code_text(&Data::Empty), None);
    }

    #[test]
    fn orders_must_be_whole_and_non_negative() {
        assert_eq!(order_value(&Data::Float(3.0)), Some(3));
        assert_eq!(order_value(&Data::Float(3.5)), None);
        assert_eq!(order_value(&Data::Float(-1.0)), None);
        assert_eq!(order_value(&Data::Int(7)), Some(7));
        assert_eq!(order_value(&Data::String("Order".into())), None);
    }

    #[test]
    fn placeholder_text_maps_to_symbols() {
        assert_eq!(cell_from_data(&Data::String("x".into())), Some(Cell::Suppressed));
        assert_eq!(
            cell_from_data(&Data::String("Median".into())),
            Some(Cell::Text("Median".into()))
        );
        assert_eq!(cell_from_data(&Data::Empty), None);
    }
}
