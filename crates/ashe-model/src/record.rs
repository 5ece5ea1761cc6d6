//! Record types shared by the ingest and transform stages.

use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};

use serde::Serialize;

use crate::cell::Cell;

/// Statistic columns, in publication order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum StatColumn {
    Population,
    Median,
    MedianChange,
    Mean,
    MeanChange,
    P10,
    P20,
    P25,
    P30,
    P40,
    P60,
    P70,
    P75,
    P80,
    P90,
}

impl StatColumn {
    pub const COUNT: usize = 15;

    pub const ALL: [StatColumn; Self::COUNT] = [
        StatColumn::Population,
        StatColumn::Median,
        StatColumn::MedianChange,
        StatColumn::Mean,
        StatColumn::MeanChange,
        StatColumn::P10,
        StatColumn::P20,
        StatColumn::P25,
        StatColumn::P30,
        StatColumn::P40,
        StatColumn::P60,
        StatColumn::P70,
        StatColumn::P75,
        StatColumn::P80,
        StatColumn::P90,
    ];

    pub const PERCENTILES: [StatColumn; 10] = [
        StatColumn::P10,
        StatColumn::P20,
        StatColumn::P25,
        StatColumn::P30,
        StatColumn::P40,
        StatColumn::P60,
        StatColumn::P70,
        StatColumn::P75,
        StatColumn::P80,
        StatColumn::P90,
    ];

    /// Column header as written in the raw extracts. Both change columns
    /// share one label and are told apart by position.
    pub fn header(self) -> &'static str {
        match self {
            StatColumn::Population => "population number",
            StatColumn::Median => "Median",
            StatColumn::MedianChange | StatColumn::MeanChange => "Year on Year % Change",
            StatColumn::Mean => "Mean",
            StatColumn::P10 => "10",
            StatColumn::P20 => "20",
            StatColumn::P25 => "25",
            StatColumn::P30 => "30",
            StatColumn::P40 => "40",
            StatColumn::P60 => "60",
            StatColumn::P70 => "70",
            StatColumn::P75 => "75",
            StatColumn::P80 => "80",
            StatColumn::P90 => "90",
        }
    }

    /// Zero-based position among the published columns.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_percentile(self) -> bool {
        self.index() >= StatColumn::P10.index()
    }

    pub fn is_change(self) -> bool {
        matches!(self, StatColumn::MedianChange | StatColumn::MeanChange)
    }

    /// Columns where a placeholder collapses to an empty cell. Only the
    /// population column keeps the symbol.
    pub fn blanks_placeholders(self) -> bool {
        self != StatColumn::Population
    }

    /// Columns forced to `x` when a point-estimate row covers too few people.
    pub fn masked_on_low_population(self) -> bool {
        !matches!(self, StatColumn::Median | StatColumn::Mean)
    }
}

/// The fifteen statistic cells of one row, indexed by [`StatColumn`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StatRow([Cell; StatColumn::COUNT]);

impl StatRow {
    pub fn new(cells: [Cell; StatColumn::COUNT]) -> Self {
        Self(cells)
    }

    /// A row with every cell set to `cell`.
    pub fn filled(cell: &Cell) -> Self {
        Self(std::array::from_fn(|_| cell.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatColumn, &Cell)> {
        StatColumn::ALL.into_iter().zip(self.0.iter())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.0
    }
}

impl Index<StatColumn> for StatRow {
    type Output = Cell;

    fn index(&self, column: StatColumn) -> &Cell {
        &self.0[column.index()]
    }
}

impl IndexMut<StatColumn> for StatRow {
    fn index_mut(&mut self, column: StatColumn) -> &mut Cell {
        &mut self.0[column.index()]
    }
}

/// A data row keyed by its prefixed code, e.g. `occ1 1115`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    pub code: String,
    pub description: String,
    pub values: StatRow,
    /// Reliability flag; zero means the row must be suppressed.
    pub safe: Cell,
}

impl NormalizedRecord {
    pub fn is_unsafe(&self) -> bool {
        is_zero_flag(&self.safe)
    }
}

/// A record placed at its template position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderedRecord {
    pub order: u32,
    pub code: String,
    /// `None` when the code exists only in the template.
    pub description: Option<String>,
    pub values: StatRow,
    pub safe: Cell,
}

impl OrderedRecord {
    pub fn is_placeholder(&self) -> bool {
        self.description.is_none()
    }

    pub fn is_unsafe(&self) -> bool {
        is_zero_flag(&self.safe)
    }
}

fn is_zero_flag(cell: &Cell) -> bool {
    match cell {
        Cell::Number(value) => *value == 0.0,
        Cell::Text(text) => text.trim().parse::<f64>().is_ok_and(|value| value == 0.0),
        _ => false,
    }
}

/// Strips a trailing `.<digits>` suffix, e.g. `1115.0` becomes `1115`.
pub fn normalize_code(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.rsplit_once('.') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit()) => head,
        _ => trimmed,
    }
}

/// Code as used for joins: `<shorthand> <normalized code>`.
pub fn prefixed_code(shorthand: &str, raw: &str) -> String {
    format!("{shorthand} {}", normalize_code(raw))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderEntry {
    pub code: String,
    pub order: u32,
}

/// Code to publication position, read from a template.
///
/// Later insertions of an existing code replace its order but keep the
/// original insertion slot, so ties on `order` sort by first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalOrder {
    entries: Vec<OrderEntry>,
    positions: BTreeMap<String, usize>,
}

impl CanonicalOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: impl Into<String>, order: u32) {
        let code = code.into();
        match self.positions.get(&code) {
            Some(&slot) => self.entries[slot].order = order,
            None => {
                self.positions.insert(code.clone(), self.entries.len());
                self.entries.push(OrderEntry { code, order });
            }
        }
    }

    pub fn get(&self, code: &str) -> Option<u32> {
        self.positions
            .get(code)
            .map(|&slot| self.entries[slot].order)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.positions.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_order(&self) -> Option<u32> {
        self.entries.iter().map(|entry| entry.order).max()
    }

    /// Entries sorted by order, stable on ties.
    pub fn sorted(&self) -> Vec<&OrderEntry> {
        let mut sorted: Vec<&OrderEntry> = self.entries.iter().collect();
        sorted.sort_by_key(|entry| entry.order);
        sorted
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for CanonicalOrder {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut order = CanonicalOrder::new();
        for (code, position) in iter {
            order.insert(code, position);
        }
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_classes() {
        assert_eq!(StatColumn::ALL.len(), StatColumn::COUNT);
        assert!(StatColumn::PERCENTILES.iter().all(|c| c.is_percentile()));
        assert!(!StatColumn::Mean.is_percentile());
        assert!(!StatColumn::Population.blanks_placeholders());
        assert!(StatColumn::MeanChange.blanks_placeholders());
        let masked: Vec<_> = StatColumn::ALL
            .into_iter()
            .filter(|c| !c.masked_on_low_population())
            .collect();
        assert_eq!(masked, vec![StatColumn::Median, StatColumn::Mean]);
    }

    #[test]
    fn canonical_order_sorts_and_overrides() {
        let order: CanonicalOrder = [("t B", 2), ("t A", 1), ("t C", 3), ("t B", 5)]
            .into_iter()
            .collect();
        assert_eq!(order.len(), 3);
        assert_eq!(order.get("t B"), Some(5));
        assert_eq!(order.max_order(), Some(5));
        let codes: Vec<&str> = order.sorted().iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["t A", "t C", "t B"]);
    }

    #[test]
    fn codes_lose_numeric_suffix() {
        assert_eq!(normalize_code("1115.0"), "1115");
        assert_eq!(normalize_code(" 11 "), "11");
        assert_eq!(normalize_code("1.2.3"), "1.2");
        assert_eq!(normalize_code("A85o"), "A85o");
        assert_eq!(normalize_code("12."), "12.");
        assert_eq!(prefixed_code("occ1", "1115.0"), "occ1 1115");
    }

    #[test]
    fn safe_flag_accepts_text_zero() {
        let record = NormalizedRecord {
            code: "t A".into(),
            description: "A".into(),
            values: StatRow::default(),
            safe: Cell::Text("0".into()),
        };
        assert!(record.is_unsafe());
        let record = NormalizedRecord {
            safe: Cell::Number(1.0),
            ..record
        };
        assert!(!record.is_unsafe());
    }
}
