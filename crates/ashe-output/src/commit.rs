//! All-or-nothing writing of a job's workbooks.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::Result;
use crate::workbook::Workbook;
use crate::xlsx::WorkbookSink;

/// A finished workbook waiting to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingWorkbook {
    pub path: PathBuf,
    pub workbook: Workbook,
}

/// Writes every workbook, or none of them.
///
/// When a write fails the files already written by this call are removed
/// before the error is returned.
pub fn commit(sink: &mut dyn WorkbookSink, pending: &[PendingWorkbook]) -> Result<Vec<PathBuf>> {
    let mut written: Vec<PathBuf> = Vec::with_capacity(pending.len());

    for item in pending {
        if let Err(error) = sink.write(&item.path, &item.workbook) {
            for path in written.iter().rev() {
                if let Err(remove_error) = sink.remove(path) {
                    warn!(
                        path = %path.display(),
                        error = %remove_error,
                        "failed to roll back written workbook"
                    );
                }
            }
            return Err(error);
        }
        info!(path = %item.path.display(), "wrote workbook");
        written.push(item.path.clone());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::error::OutputError;
    use crate::xlsx::MemorySink;

    /// Fails on the n-th write.
    struct FailingSink {
        inner: MemorySink,
        fail_at: usize,
    }

    impl WorkbookSink for FailingSink {
        fn write(&mut self, path: &Path, workbook: &Workbook) -> Result<()> {
            if self.inner.written.len() == self.fail_at {
                return Err(OutputError::SheetMissing {
                    path: path.to_path_buf(),
                    sheet: "All".into(),
                });
            }
            self.inner.write(path, workbook)
        }

        fn remove(&mut self, path: &Path) -> std::io::Result<()> {
            self.inner.remove(path)
        }
    }

    fn pending(names: &[&str]) -> Vec<PendingWorkbook> {
        names
            .iter()
            .map(|name| PendingWorkbook {
                path: PathBuf::from(name),
                workbook: Workbook::default(),
            })
            .collect()
    }

    #[test]
    fn writes_everything_on_success() {
        let mut sink = MemorySink::default();
        let written = commit(&mut sink, &pending(&["a.xlsx", "b.xlsx"])).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(sink.written.len(), 2);
    }

    #[test]
    fn rolls_back_on_failure() {
        let mut sink = FailingSink {
            inner: MemorySink::default(),
            fail_at: 2,
        };
        let result = commit(&mut sink, &pending(&["a.xlsx", "b.xlsx", "c.xlsx"]));
        assert!(result.is_err());
        assert!(sink.inner.written.is_empty());
    }
}
