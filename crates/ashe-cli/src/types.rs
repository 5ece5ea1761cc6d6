use std::path::PathBuf;

use ashe_core::JobReport;

#[derive(Debug)]
pub struct RunResult {
    pub year: i32,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub jobs: Vec<JobOutcome>,
}

impl RunResult {
    pub fn has_errors(&self) -> bool {
        self.jobs.iter().any(|job| job.report.is_err())
    }
}

#[derive(Debug)]
pub struct JobOutcome {
    pub table: &'static str,
    pub variable: &'static str,
    /// The report, or the error that aborted the job.
    pub report: Result<JobReport, String>,
}
