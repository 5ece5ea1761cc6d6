//! Error types for template reading and workbook writing.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// A template or footnote workbook could not be opened.
    #[error("failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// A sheet exists but could not be read.
    #[error("failed to read sheet '{sheet}' in {path}: {source}")]
    SheetRead {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("sheet '{sheet}' not found in {path}")]
    SheetMissing { path: PathBuf, sheet: String },

    #[error("sheet '{sheet}' in {path} has no '{column}' column")]
    ColumnMissing {
        path: PathBuf,
        sheet: String,
        column: String,
    },

    #[error("sheet '{sheet}' in {path} has {found} footnotes, expected {expected}")]
    FootnotesShort {
        path: PathBuf,
        sheet: String,
        found: usize,
        expected: usize,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Building or saving an XLSX file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },
}

pub type Result<T> = std::result::Result<T, OutputError>;
