//! Job outcomes.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use ashe_model::{Category, ValueKind};
use serde::Serialize;

/// Non-fatal conditions met while assembling a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobWarning {
    /// This year's and last year's codes differ, so no year-on-year change
    /// was computed for the category.
    CodeAlignment {
        category: Category,
        current: usize,
        previous: usize,
    },
    /// No data row matched the template.
    EmptyResult {
        category: Category,
        value_kind: ValueKind,
    },
    /// There is no previous-year extract to compare against.
    NoPreviousYear { year: i32 },
}

impl fmt::Display for JobWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobWarning::CodeAlignment {
                category,
                current,
                previous,
            } => write!(
                f,
                "{category}: codes differ from previous year ({current} vs {previous} rows), change columns left empty"
            ),
            JobWarning::EmptyResult {
                category,
                value_kind,
            } => write!(f, "{category}: no {value_kind} rows matched the template"),
            JobWarning::NoPreviousYear { year } => {
                write!(f, "no {year} extracts, change columns left empty")
            }
        }
    }
}

/// Summary of one table x variable job.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobReport {
    pub table: &'static str,
    pub variable: &'static str,
    pub year: i32,
    /// Files written, or that would have been written on a dry run.
    pub files: Vec<PathBuf>,
    pub dry_run: bool,
    pub warnings: Vec<JobWarning>,
    #[serde(skip)]
    pub duration: Duration,
}

impl JobReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
