//! Rounding, unit conversion and placeholder encoding for one dataset.
//!
//! Numeric coercion never fails: text that is not a number becomes the
//! not-collected placeholder. Every such fallback is logged at debug level,
//! and a single warning per dataset reports how many happened.

use ashe_model::{Cell, NormalizedRecord, StatColumn, StatRow, ValueKind, VariableSpec};

use crate::rounding::{round_half_up, round_scaled};

/// Decimal places for rounded statistics.
const STAT_PLACES: u32 = 1;
/// Point-estimate populations are published in thousands.
const THOUSANDS_SHIFT: u32 = 3;
/// Hourly figures arrive in pence and are published in pounds.
const PENCE_SHIFT: u32 = 2;
const PENCE_PLACES: u32 = 2;

/// Counts coercion fallbacks while one dataset is normalized.
#[derive(Debug, Default)]
struct Coercions {
    count: usize,
}

impl Coercions {
    /// Reads `cell` as a number. A bare `.` or an empty cell is silently
    /// missing; any other text is a logged fallback.
    fn number(&mut self, cell: &Cell, column: StatColumn, code: &str) -> Option<f64> {
        match cell {
            Cell::Number(value) if value.is_finite() => Some(*value),
            Cell::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed == Cell::UNAVAILABLE {
                    return None;
                }
                match trimmed.parse::<f64>() {
                    Ok(value) if value.is_finite() => Some(value),
                    _ => {
                        self.count += 1;
                        tracing::debug!(
                            column = column.header(),
                            code,
                            raw = trimmed,
                            "non-numeric statistic replaced with placeholder"
                        );
                        None
                    }
                }
            }
            _ => None,
        }
    }
}

fn published(value: Option<f64>) -> Cell {
    value.map_or(Cell::Unavailable, Cell::Number)
}

/// Reads a cell the normalizer does not round: numbers become numbers,
/// placeholders keep their meaning, and other text is kept as is.
fn passthrough(cell: &Cell) -> Cell {
    match cell {
        Cell::Text(text) => {
            let trimmed = text.trim();
            if let Some(symbol) = Cell::from_symbol(trimmed) {
                return symbol;
            }
            match trimmed.parse::<f64>() {
                Ok(value) if value.is_finite() => Cell::Number(value),
                _ => Cell::Text(trimmed.to_string()),
            }
        }
        other => other.clone(),
    }
}

fn normalize_row(
    values: &StatRow,
    code: &str,
    kind: ValueKind,
    variable: &VariableSpec,
    coercions: &mut Coercions,
) -> StatRow {
    let pence = variable.hourly && kind == ValueKind::PointEstimate;
    let mut out = StatRow::default();

    for (column, cell) in values.iter() {
        out[column] = match column {
            StatColumn::Population => {
                let raw = match cell {
                    Cell::Text(text) if text.trim() == Cell::UNAVAILABLE => Some(0.0),
                    other => coercions.number(other, column, code),
                };
                let value = match kind {
                    ValueKind::PointEstimate => {
                        raw.map(|v| round_scaled(v, THOUSANDS_SHIFT, 0))
                    }
                    ValueKind::ReliabilityScore => raw,
                };
                published(value)
            }
            StatColumn::Mean => published(
                coercions
                    .number(cell, column, code)
                    .map(|v| round_half_up(v, STAT_PLACES)),
            ),
            StatColumn::Median => {
                let raw = coercions.number(cell, column, code);
                let value = if pence {
                    raw.map(|v| round_scaled(v, PENCE_SHIFT, PENCE_PLACES))
                } else if variable.hourly {
                    raw
                } else {
                    raw.map(|v| round_half_up(v, STAT_PLACES))
                };
                published(value)
            }
            StatColumn::MedianChange | StatColumn::MeanChange => passthrough(cell),
            percentile => {
                let rounded = coercions
                    .number(cell, percentile, code)
                    .map(|v| round_half_up(v, STAT_PLACES));
                let value = if pence {
                    rounded.map(|v| round_scaled(v, PENCE_SHIFT, PENCE_PLACES))
                } else {
                    rounded
                };
                published(value)
            }
        };
    }
    out
}

/// Applies the statistical rules to every record of one aggregated dataset.
///
/// Point-estimate populations are reported in thousands; hourly point
/// estimates are converted from pence to pounds; everything else is rounded
/// half-up to one decimal. Missing values become `.`.
pub fn normalize_dataset(
    records: Vec<NormalizedRecord>,
    kind: ValueKind,
    variable: &VariableSpec,
) -> Vec<NormalizedRecord> {
    let mut coercions = Coercions::default();
    let normalized: Vec<NormalizedRecord> = records
        .into_iter()
        .map(|record| {
            let values = normalize_row(&record.values, &record.code, kind, variable, &mut coercions);
            NormalizedRecord {
                values,
                safe: passthrough(&record.safe),
                ..record
            }
        })
        .collect();

    if coercions.count > 0 {
        tracing::warn!(
            variable = variable.name,
            value_kind = %kind,
            fallbacks = coercions.count,
            "non-numeric statistics replaced with placeholders"
        );
    }
    normalized
}
