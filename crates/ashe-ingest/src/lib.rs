//! Survey extract ingestion.
//!
//! Finds extract files, splits each into its nine category sections and
//! concatenates the sources a table needs.

pub mod aggregate;
pub mod discovery;
pub mod error;
pub mod extract;

pub use aggregate::{ExtractAggregator, dedupe};
pub use discovery::{ExtractName, SourceCatalog, list_csv_files};
pub use error::{IngestError, Result};
pub use extract::{
    MARKER_OFFSET, PREAMBLE_LINES, RawExtract, SECTION_MARKER, SectionedExtract, load_sections,
    parse_extract, read_extract,
};
