//! Year-on-year percentage change for the main point-estimate table.

use ashe_model::{Cell, OrderedRecord, StatColumn};

use crate::rounding::round_half_up;

/// What happened to the change columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Applied,
    /// The two years do not list the same codes in the same order.
    CodeMismatch { current: usize, previous: usize },
}

/// `((current - previous) / previous) * 100`, rounded half-up to one
/// decimal. `None` when either side is missing or the result is not finite.
pub fn percentage_change(previous: f64, current: f64) -> Option<f64> {
    let change = ((current - previous) / previous) * 100.0;
    change.is_finite().then(|| round_half_up(change, 1))
}

fn change_cell(previous: &Cell, current: &Cell) -> Cell {
    match (previous.as_number(), current.as_number()) {
        (Some(previous), Some(current)) => {
            percentage_change(previous, current).map_or(Cell::Empty, Cell::Number)
        }
        _ => Cell::Empty,
    }
}

fn set_change(record: &mut OrderedRecord, column: StatColumn, value: Cell) {
    if record.values[column] != Cell::Suppressed {
        record.values[column] = value;
    }
}

/// Empties both change columns, keeping cells already suppressed.
pub fn clear_changes(records: &mut [OrderedRecord]) {
    for record in records {
        set_change(record, StatColumn::MedianChange, Cell::Empty);
        set_change(record, StatColumn::MeanChange, Cell::Empty);
    }
}

/// Fills the median and mean change columns of `current` from `previous`.
///
/// Both sides must already be in template order with identical code
/// sequences; otherwise the change columns are cleared and the mismatch is
/// returned for the caller to report. Suppressed cells stay suppressed.
pub fn compare_years(current: &mut [OrderedRecord], previous: &[OrderedRecord]) -> Comparison {
    let aligned = current.len() == previous.len()
        && current
            .iter()
            .zip(previous)
            .all(|(now, before)| now.code == before.code);
    if !aligned {
        clear_changes(current);
        return Comparison::CodeMismatch {
            current: current.len(),
            previous: previous.len(),
        };
    }

    for (now, before) in current.iter_mut().zip(previous) {
        let median = change_cell(
            &before.values[StatColumn::Median],
            &now.values[StatColumn::Median],
        );
        let mean = change_cell(&before.values[StatColumn::Mean], &now.values[StatColumn::Mean]);
        set_change(now, StatColumn::MedianChange, median);
        set_change(now, StatColumn::MeanChange, mean);
    }
    Comparison::Applied
}

#[cfg(test)]
mod tests {
    use ashe_model::StatRow;

    use super::*;

    fn row(code: &str, median: Cell, mean: Cell) -> OrderedRecord {
        let mut values = StatRow::default();
        values[StatColumn::Median] = median;
        values[StatColumn::Mean] = mean;
        values[StatColumn::MedianChange] = Cell::Number(99.0);
        OrderedRecord {
            order: 1,
            code: code.to_string(),
            description: Some(code.to_string()),
            values,
            safe: Cell::Number(1.0),
        }
    }

    #[test]
    fn ten_percent_rise() {
        assert_eq!(percentage_change(100.0, 110.0), Some(10.0));
        assert_eq!(percentage_change(200.0, 150.0), Some(-25.0));
        assert_eq!(percentage_change(3.0, 4.0), Some(33.3));
    }

    #[test]
    fn zero_or_missing_previous_is_empty() {
        assert_eq!(percentage_change(0.0, 110.0), None);
        assert_eq!(percentage_change(0.0, 0.0), None);
        assert_eq!(percentage_change(f64::NAN, 1.0), None);
    }

    #[test]
    fn compares_aligned_rows() {
        let mut current = vec![
            row("t A", Cell::Number(110.0), Cell::Number(50.0)),
            row("t B", Cell::Unavailable, Cell::Number(10.0)),
        ];
        let previous = vec![
            row("t A", Cell::Number(100.0), Cell::Number(0.0)),
            row("t B", Cell::Number(5.0), Cell::Number(8.0)),
        ];
        assert_eq!(compare_years(&mut current, &previous), Comparison::Applied);
        assert_eq!(current[0].values[StatColumn::MedianChange], Cell::Number(10.0));
        assert_eq!(current[0].values[StatColumn::MeanChange], Cell::Empty);
        assert_eq!(current[1].values[StatColumn::MedianChange], Cell::Empty);
        assert_eq!(current[1].values[StatColumn::MeanChange], Cell::Number(25.0));
    }

    #[test]
    fn mismatched_codes_clear_changes() {
        let mut current = vec![row("t A", Cell::Number(1.0), Cell::Number(1.0))];
        current[0].values[StatColumn::MeanChange] = Cell::Suppressed;
        let previous = vec![row("t Z", Cell::Number(1.0), Cell::Number(1.0))];
        assert_eq!(
            compare_years(&mut current, &previous),
            Comparison::CodeMismatch {
                current: 1,
                previous: 1
            }
        );
        assert_eq!(current[0].values[StatColumn::MedianChange], Cell::Empty);
        assert_eq!(current[0].values[StatColumn::MeanChange], Cell::Suppressed);
    }
}
