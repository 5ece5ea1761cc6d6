//! Joins a dataset to the canonical template order.

use std::collections::HashMap;

use ashe_model::{CanonicalOrder, Cell, NormalizedRecord, OrderedRecord, StatColumn, StatRow};

/// Result of placing a dataset in template order.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged {
    /// One row per template code, in publication order.
    pub records: Vec<OrderedRecord>,
    /// Rows that found their code in the data.
    pub matched: usize,
    /// Data rows whose code is not part of the template.
    pub unplaced: usize,
}

impl Merged {
    /// True when no data row made it into the table.
    pub fn is_empty_result(&self) -> bool {
        self.matched == 0
    }
}

/// A row for a template code with no data: `:` in the population column,
/// empty elsewhere.
pub fn placeholder(code: &str, order: u32) -> OrderedRecord {
    let mut values = StatRow::default();
    for column in StatColumn::ALL {
        values[column] = blank_for(column, Cell::Absent);
    }
    OrderedRecord {
        order,
        code: code.to_string(),
        description: None,
        values,
        safe: Cell::Absent,
    }
}

/// Placeholder symbol as it appears in `column`.
pub(crate) fn blank_for(column: StatColumn, placeholder: Cell) -> Cell {
    if column.blanks_placeholders() {
        Cell::Empty
    } else {
        placeholder
    }
}

/// Places `records` in canonical order.
///
/// Codes absent from the template are dropped; template codes absent from
/// the data become placeholder rows. Ties on order keep template order.
pub fn apply_order(records: &[NormalizedRecord], order: &CanonicalOrder) -> Merged {
    let mut by_code: HashMap<&str, Vec<&NormalizedRecord>> = HashMap::new();
    for record in records {
        by_code.entry(record.code.as_str()).or_default().push(record);
    }

    let mut merged = Vec::with_capacity(order.len());
    let mut matched = 0usize;
    for entry in order.sorted() {
        match by_code.get(entry.code.as_str()) {
            Some(rows) => {
                for record in rows {
                    matched += 1;
                    merged.push(OrderedRecord {
                        order: entry.order,
                        code: record.code.clone(),
                        description: Some(record.description.clone()),
                        values: record.values.clone(),
                        safe: record.safe.clone(),
                    });
                }
            }
            None => merged.push(placeholder(&entry.code, entry.order)),
        }
    }

    let unplaced = records
        .iter()
        .filter(|record| !order.contains(&record.code))
        .count();
    if unplaced > 0 {
        tracing::debug!(unplaced, "dropped rows not in the template");
    }

    Merged {
        records: merged,
        matched,
        unplaced,
    }
}
