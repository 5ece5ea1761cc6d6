//! Combines the extracts a table needs into one dataset per category.

use std::collections::HashMap;

use ashe_model::{Category, NormalizedRecord, PerCategory, TableSpec, ValueKind, VariableSpec};

use crate::discovery::SourceCatalog;
use crate::error::Result;
use crate::extract::load_sections;

/// Loads and concatenates source extracts from one catalog.
#[derive(Debug, Clone, Copy)]
pub struct ExtractAggregator<'a> {
    catalog: &'a SourceCatalog,
}

impl<'a> ExtractAggregator<'a> {
    pub fn new(catalog: &'a SourceCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a SourceCatalog {
        self.catalog
    }

    /// Every category's dataset for one table, variable, value kind and
    /// year. Each source file is read once.
    ///
    /// Fails with `MissingSource` as soon as one source has no extract.
    pub fn aggregate(
        &self,
        table: &TableSpec,
        variable: &VariableSpec,
        kind: ValueKind,
        year: i32,
    ) -> Result<PerCategory<Vec<NormalizedRecord>>> {
        let span = tracing::debug_span!(
            "aggregate",
            table = table.name,
            variable = variable.code,
            value_kind = %kind,
            year
        );
        let _guard = span.enter();

        let mut combined = PerCategory::from_fn(|_| Vec::new());
        for shorthand in table.sources {
            let path = self.catalog.locate(shorthand, variable.code, year, kind)?;
            for (category, records) in load_sections(path, shorthand)? {
                combined[category].extend(records);
            }
        }
        Ok(combined.map(dedupe))
    }

    /// One category's dataset.
    pub fn aggregate_category(
        &self,
        table: &TableSpec,
        variable: &VariableSpec,
        kind: ValueKind,
        category: Category,
        year: i32,
    ) -> Result<Vec<NormalizedRecord>> {
        let mut all = self.aggregate(table, variable, kind, year)?;
        Ok(std::mem::take(&mut all[category]))
    }
}

/// Drops exact duplicate rows. When two sources disagree on the same code
/// the first row wins and the conflict is logged.
pub fn dedupe(category: Category, records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut kept: Vec<NormalizedRecord> = Vec::with_capacity(records.len());
    let mut duplicates = 0usize;

    for record in records {
        match seen.get(&record.code) {
            Some(&slot) => {
                if kept[slot] != record {
                    tracing::warn!(
                        category = %category,
                        code = %record.code,
                        "conflicting rows for one code, keeping the first"
                    );
                }
                duplicates += 1;
            }
            None => {
                seen.insert(record.code.clone(), kept.len());
                kept.push(record);
            }
        }
    }

    if duplicates > 0 {
        tracing::debug!(category = %category, duplicates, "removed duplicate rows");
    }
    kept
}

#[cfg(test)]
mod tests {
    use ashe_model::{Cell, StatRow};

    use super::*;

    fn record(code: &str, description: &str) -> NormalizedRecord {
        NormalizedRecord {
            code: code.to_string(),
            description: description.to_string(),
            values: StatRow::default(),
            safe: Cell::Text("1".to_string()),
        }
    }

    #[test]
    fn exact_duplicates_collapse_in_first_seen_order() {
        let records = vec![
            record("wgor K02000001", "UK"),
            record("weng K02000001", "UK"),
            record("wgor K02000001", "UK"),
        ];
        let kept = dedupe(Category::All, records);
        let codes: Vec<_> = kept.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["wgor K02000001", "weng K02000001"]);
    }

    #[test]
    fn conflicting_code_keeps_first_row() {
        let kept = dedupe(
            Category::Male,
            vec![record("occ1 11", "Managers"), record("occ1 11", "Directors")],
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].description, "Managers");
    }
}
