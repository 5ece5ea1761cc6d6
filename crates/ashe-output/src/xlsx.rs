//! Writing workbooks to disk.

use std::path::{Path, PathBuf};

use ashe_model::{Cell, Fill};
use rust_xlsxwriter::{Color, Format, FormatPattern, Workbook as XlsxWorkbook, XlsxError};

use crate::error::{OutputError, Result};
use crate::workbook::Workbook;

/// Light fill for reliability band (5, 10].
pub const LIGHT_FILL: u32 = 0x00FFFF;
/// Dark fill for reliability bands above 10.
pub const DARK_FILL: u32 = 0x33CCCC;

/// Destination for finished workbooks.
pub trait WorkbookSink {
    fn write(&mut self, path: &Path, workbook: &Workbook) -> Result<()>;

    /// Undoes an earlier [`WorkbookSink::write`].
    fn remove(&mut self, path: &Path) -> std::io::Result<()>;
}

/// Saves workbooks as XLSX files.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxSink;

impl WorkbookSink for XlsxSink {
    fn write(&mut self, path: &Path, workbook: &Workbook) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        save_xlsx(workbook, path).map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn remove(&mut self, path: &Path) -> std::io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// Keeps workbooks in memory instead of writing them.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub written: Vec<(PathBuf, Workbook)>,
}

impl WorkbookSink for MemorySink {
    fn write(&mut self, path: &Path, workbook: &Workbook) -> Result<()> {
        self.written.push((path.to_path_buf(), workbook.clone()));
        Ok(())
    }

    fn remove(&mut self, path: &Path) -> std::io::Result<()> {
        self.written.retain(|(written, _)| written != path);
        Ok(())
    }
}

fn fill_format(color: u32) -> Format {
    Format::new()
        .set_pattern(FormatPattern::Solid)
        .set_background_color(Color::RGB(color))
}

pub fn save_xlsx(workbook: &Workbook, path: &Path) -> std::result::Result<(), XlsxError> {
    let light = fill_format(LIGHT_FILL);
    let dark = fill_format(DARK_FILL);
    let mut xlsx = XlsxWorkbook::new();

    for sheet in workbook.sheets() {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for ((row, col), cell) in sheet.cells() {
            let format = match cell.fill {
                Fill::None => None,
                Fill::Light => Some(&light),
                Fill::Dark => Some(&dark),
            };
            match (&cell.value, format) {
                (Cell::Number(value), Some(fmt)) => {
                    worksheet.write_number_with_format(row, col, *value, fmt)?;
                }
                (Cell::Number(value), None) => {
                    worksheet.write_number(row, col, *value)?;
                }
                (Cell::Empty, Some(fmt)) => {
                    worksheet.write_blank(row, col, fmt)?;
                }
                (Cell::Empty, None) => {}
                (other, Some(fmt)) => {
                    worksheet.write_string_with_format(row, col, other.to_string(), fmt)?;
                }
                (other, None) => {
                    worksheet.write_string(row, col, other.to_string())?;
                }
            }
        }
    }

    xlsx.save(path)?;
    Ok(())
}
