//! Extract file discovery.
//!
//! Extracts are named `<shorthand> - <VARCODE> <year> - <Values|CVs>.csv`.
//! Matching is on the exact shorthand segment, so `gro` never picks up
//! `agegroup` files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ashe_model::ValueKind;

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// The parts of an extract file name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtractName {
    pub shorthand: String,
    pub variable_code: String,
    pub year: i32,
    pub kind: ValueKind,
}

impl ExtractName {
    /// Parses a file stem such as `occ1 - BPAYinc 2024 - CVs`.
    pub fn parse(stem: &str) -> Option<Self> {
        let mut parts = stem.split(" - ");
        let shorthand = parts.next()?.trim();
        let middle = parts.next()?.trim();
        let kind = ValueKind::from_file_label(parts.next()?)?;
        if parts.next().is_some() || shorthand.is_empty() {
            return None;
        }
        let (variable_code, year) = middle.rsplit_once(' ')?;
        let year = year.trim().parse().ok()?;
        Some(Self {
            shorthand: shorthand.to_string(),
            variable_code: variable_code.trim().to_string(),
            year,
            kind,
        })
    }
}

/// Every extract found in one input directory, indexed by name.
#[derive(Debug, Clone, Default)]
pub struct SourceCatalog {
    dir: PathBuf,
    files: BTreeMap<ExtractName, PathBuf>,
}

impl SourceCatalog {
    /// Scans `dir` once. Files that do not follow the naming scheme are
    /// skipped with a debug event.
    pub fn scan(dir: &Path) -> Result<Self> {
        let mut files = BTreeMap::new();
        for path in list_csv_files(dir)? {
            let stem = path
                .file_stem()
                .and_then(|v| v.to_str())
                .unwrap_or_default();
            match ExtractName::parse(stem) {
                Some(name) => {
                    if let Some(previous) = files.insert(name, path.clone()) {
                        tracing::warn!(
                            kept = %path.display(),
                            ignored = %previous.display(),
                            "two extracts share one name"
                        );
                    }
                }
                None => tracing::debug!(path = %path.display(), "not an extract file"),
            }
        }
        tracing::debug!(dir = %dir.display(), extracts = files.len(), "scanned extract directory");
        Ok(Self {
            dir: dir.to_path_buf(),
            files,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Path of the extract for one source, variable, year and value kind.
    pub fn locate(
        &self,
        shorthand: &str,
        variable_code: &str,
        year: i32,
        kind: ValueKind,
    ) -> Result<&Path> {
        let key = ExtractName {
            shorthand: shorthand.to_string(),
            variable_code: variable_code.to_string(),
            year,
            kind,
        };
        self.files
            .get(&key)
            .map(PathBuf::as_path)
            .ok_or_else(|| IngestError::MissingSource {
                source_code: shorthand.to_string(),
                variable: variable_code.to_string(),
                year,
                kind,
                dir: self.dir.clone(),
            })
    }

    /// Whether any extract exists for this variable and year.
    pub fn has_year(&self, variable_code: &str, year: i32) -> bool {
        self.files
            .keys()
            .any(|name| name.variable_code == variable_code && name.year == year)
    }
}
