//! Error types for extract ingestion.

use std::path::PathBuf;

use ashe_model::ValueKind;
use thiserror::Error;

/// Errors that can occur while locating and reading survey extracts.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// A line of the extract is not valid CSV.
    #[error("failed to parse CSV {path} at line {line}: {source}")]
    CsvParse {
        path: PathBuf,
        line: usize,
        #[source]
        source: csv::Error,
    },

    /// Required column not found in the header row.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    // === Extract Structure Errors ===
    /// The nine-section layout of an extract is broken.
    #[error("malformed extract {path}: {reason}")]
    MalformedExtract { path: PathBuf, reason: String },

    /// No extract exists for a source the table needs.
    #[error("no {kind} extract for source '{source_code}' ({variable} {year}) in {dir}")]
    MissingSource {
        source_code: String,
        variable: String,
        year: i32,
        kind: ValueKind,
        dir: PathBuf,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
