//! Template reading, footnote lookup and workbook output.
//!
//! Templates and footnotes are read with `calamine`; finished workbooks are
//! built in memory and written with `rust_xlsxwriter` through a
//! [`WorkbookSink`].

pub mod commit;
pub mod error;
pub mod footnotes;
pub mod naming;
pub mod template;
pub mod workbook;
pub mod xlsx;

pub use commit::{PendingWorkbook, commit};
pub use error::{OutputError, Result};
pub use footnotes::{
    FOOTNOTE_LINES, FOOTNOTE_WORKBOOK, FootnoteSource, StaticFootnotes, XlsxFootnotes,
};
pub use naming::{output_dir, output_file_name, workbook_title};
pub use template::{Template, TemplateSource, XlsxTemplates, read_template};
pub use workbook::{DATA_FIRST_COL, DATA_FIRST_ROW, HEADER_ROWS, Sheet, Workbook};
pub use xlsx::{DARK_FILL, LIGHT_FILL, MemorySink, WorkbookSink, XlsxSink, save_xlsx};
