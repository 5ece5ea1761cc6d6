//! ASHE table assembly.
//!
//! [`TableAssembler`] runs one job per table x variable: it aggregates and
//! normalizes the extracts, renders the six publication variants of every
//! category and commits the resulting workbooks together.

pub mod assembler;
pub mod error;
pub mod render;
pub mod report;

pub use assembler::{AssembledJob, AssemblyOptions, TableAssembler};
pub use error::{AssembleError, Result};
pub use render::{CategoryData, CategoryTables, render_category};
pub use report::{JobReport, JobWarning};
