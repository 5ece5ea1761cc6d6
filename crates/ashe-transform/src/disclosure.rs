//! Disclosure control: unsafe-row suppression, the low-population mask and
//! reliability banding.
//!
//! Every function takes its rows by value or by shared reference and returns
//! new rows, so one rendering can never leak masking into a sibling.

use ashe_model::{
    BandingPolicy, Cell, Fill, NormalizedRecord, OrderedRecord, StatColumn, StatRow, StyledCell,
};

use crate::order::blank_for;

/// Point-estimate rows covering this many thousand people or fewer are
/// masked in the main table.
pub const POPULATION_THRESHOLD: f64 = 3.0;

/// One published row, with colouring.
pub type StyledRow = Vec<StyledCell>;

/// Replaces the comparison and percentile cells of low-population rows with
/// `x`. Applied to point estimates before ordering.
pub fn mask_low_population(mut records: Vec<NormalizedRecord>) -> Vec<NormalizedRecord> {
    let mut masked = 0usize;
    for record in &mut records {
        let low = record.values[StatColumn::Population]
            .as_number()
            .is_some_and(|population| population <= POPULATION_THRESHOLD);
        if !low {
            continue;
        }
        masked += 1;
        for column in StatColumn::ALL {
            if column.masked_on_low_population() {
                record.values[column] = Cell::Suppressed;
            }
        }
    }
    if masked > 0 {
        tracing::debug!(masked, "masked low-population rows");
    }
    records
}

/// Suppresses every row whose safe flag is zero: `..` in the population
/// column, empty everywhere else.
pub fn make_safe(mut records: Vec<OrderedRecord>) -> Vec<OrderedRecord> {
    for record in records.iter_mut().filter(|record| record.is_unsafe()) {
        for column in StatColumn::ALL {
            record.values[column] = blank_for(column, Cell::Unsafe);
        }
        record.safe = Cell::Unsafe;
    }
    records
}

/// Drops the code, order, description and safe flag, leaving only the
/// published statistic columns.
pub fn publish_rows(records: &[OrderedRecord]) -> Vec<StatRow> {
    records.iter().map(|record| record.values.clone()).collect()
}

/// Rows rendered without colouring.
pub fn plain_rows(rows: &[StatRow]) -> Vec<StyledRow> {
    rows.iter()
        .map(|row| row.cells().iter().cloned().map(StyledCell::plain).collect())
        .collect()
}

/// Reliability band of a coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// Zero, or a non-positive score.
    Zero,
    /// (0, 5]
    Precise,
    /// (5, 10]
    Reasonable,
    /// (10, 20]
    Acceptable,
    /// Above 20.
    Unreliable,
}

impl Band {
    pub fn classify(score: f64) -> Band {
        if score <= 0.0 || score.is_nan() {
            Band::Zero
        } else if score <= 5.0 {
            Band::Precise
        } else if score <= 10.0 {
            Band::Reasonable
        } else if score <= 20.0 {
            Band::Acceptable
        } else {
            Band::Unreliable
        }
    }

    pub fn fill(self) -> Fill {
        match self {
            Band::Zero | Band::Precise => Fill::None,
            Band::Reasonable => Fill::Light,
            Band::Acceptable | Band::Unreliable => Fill::Dark,
        }
    }
}

fn band_cell(column: StatColumn, cell: &Cell, policy: BandingPolicy) -> StyledCell {
    match cell {
        Cell::Number(score) => {
            let band = Band::classify(*score);
            let value = if band == Band::Unreliable && policy.suppresses() {
                Cell::Suppressed
            } else {
                Cell::Number(*score)
            };
            StyledCell {
                value,
                fill: band.fill(),
            }
        }
        Cell::Unavailable if column.is_percentile() => StyledCell {
            value: Cell::Suppressed,
            fill: Fill::Dark,
        },
        other => StyledCell::plain(other.clone()),
    }
}

/// Colours reliability scores by band. Under
/// [`BandingPolicy::SuppressOverTwenty`] scores above 20 also become `x`.
/// Uncollected percentiles are `x` under either policy.
pub fn band_scores(rows: &[StatRow], policy: BandingPolicy) -> Vec<StyledRow> {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|(column, cell)| band_cell(column, cell, policy))
                .collect()
        })
        .collect()
}

/// Carries the reliability annotation onto point estimates: each cell takes
/// the fill of the matching interim CV cell, and becomes `x` where that
/// cell is `x`. Rows are matched by position.
pub fn annotate_estimates(rows: &[StatRow], cv_interim: &[StyledRow]) -> Vec<StyledRow> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let cv_row = cv_interim.get(index);
            row.cells()
                .iter()
                .enumerate()
                .map(|(position, cell)| match cv_row.and_then(|cv| cv.get(position)) {
                    Some(cv) => StyledCell {
                        value: if cv.value == Cell::Suppressed {
                            Cell::Suppressed
                        } else {
                            cell.clone()
                        },
                        fill: cv.fill,
                    },
                    None => StyledCell::plain(cell.clone()),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordered(code: &str, safe: f64, population: f64) -> OrderedRecord {
        let mut values = StatRow::filled(&Cell::Number(7.0));
        values[StatColumn::Population] = Cell::Number(population);
        OrderedRecord {
            order: 1,
            code: code.to_string(),
            description: Some(code.to_string()),
            values,
            safe: Cell::Number(safe),
        }
    }

    #[test]
    fn unsafe_rows_are_blanked_except_population() {
        let rows = make_safe(vec![ordered("t A", 0.0, 12.0), ordered("t B", 1.0, 12.0)]);
        assert_eq!(rows[0].values[StatColumn::Population], Cell::Unsafe);
        assert_eq!(rows[0].values[StatColumn::Median], Cell::Empty);
        assert_eq!(rows[0].values[StatColumn::P90], Cell::Empty);
        assert_eq!(rows[1].values[StatColumn::Median], Cell::Number(7.0));
    }

    #[test]
    fn placeholder_rows_are_not_unsafe() {
        let mut row = ordered("t A", 1.0, 1.0);
        row.safe = Cell::Absent;
        let rows = make_safe(vec![row.clone()]);
        assert_eq!(rows[0], row);
    }

    #[test]
    fn low_population_masks_all_but_median_and_mean() {
        let record = |population: f64| NormalizedRecord {
            code: "t A".into(),
            description: "A".into(),
            values: {
                let mut values = StatRow::filled(&Cell::Number(50.0));
                values[StatColumn::Population] = Cell::Number(population);
                values
            },
            safe: Cell::Number(1.0),
        };
        let masked = mask_low_population(vec![record(2.0), record(3.0), record(4.0)]);
        for row in &masked[..2] {
            for (column, cell) in row.values.iter() {
                let expected = if column.masked_on_low_population() {
                    Cell::Suppressed
                } else {
                    Cell::Number(50.0)
                };
                assert_eq!(cell, &expected, "{column:?}");
            }
        }
        assert_eq!(masked[2].values[StatColumn::P10], Cell::Number(50.0));
    }

    #[test]
    fn bands_and_policies() {
        let mut row = StatRow::filled(&Cell::Number(0.0));
        row[StatColumn::Population] = Cell::Number(4.0);
        row[StatColumn::Median] = Cell::Number(7.5);
        row[StatColumn::Mean] = Cell::Number(15.0);
        row[StatColumn::P10] = Cell::Number(25.0);
        row[StatColumn::P20] = Cell::Unavailable;
        row[StatColumn::MedianChange] = Cell::Unavailable;
        row[StatColumn::MeanChange] = Cell::Empty;

        let rows = std::slice::from_ref(&row);
        let interim_rows = band_scores(rows, BandingPolicy::SuppressOverTwenty);
        let final_rows = band_scores(rows, BandingPolicy::KeepValues);
        let interim = &interim_rows[0];
        let fin = &final_rows[0];
        let at = |cells: &StyledRow, column: StatColumn| cells[column.index()].clone();

        assert_eq!(at(interim, StatColumn::Population).fill, Fill::None);
        assert_eq!(at(interim, StatColumn::Median).fill, Fill::Light);
        assert_eq!(at(interim, StatColumn::Mean).fill, Fill::Dark);
        assert_eq!(
            at(interim, StatColumn::P10),
            StyledCell {
                value: Cell::Suppressed,
                fill: Fill::Dark
            }
        );
        assert_eq!(
            at(fin, StatColumn::P10),
            StyledCell {
                value: Cell::Number(25.0),
                fill: Fill::Dark
            }
        );
        for cells in [interim, fin] {
            assert_eq!(at(cells, StatColumn::P20).value, Cell::Suppressed);
            assert_eq!(at(cells, StatColumn::MedianChange).value, Cell::Unavailable);
            assert_eq!(at(cells, StatColumn::MeanChange).value, Cell::Empty);
            assert_eq!(at(cells, StatColumn::P90).fill, Fill::None);
        }
    }

    #[test]
    fn estimates_take_cv_annotation() {
        let mut cv = StatRow::filled(&Cell::Number(1.0));
        cv[StatColumn::Median] = Cell::Number(30.0);
        cv[StatColumn::Mean] = Cell::Number(12.0);
        let interim = band_scores(&[cv], BandingPolicy::SuppressOverTwenty);

        let values = StatRow::filled(&Cell::Number(500.0));
        let annotated = annotate_estimates(&[values.clone(), values], &interim);
        assert_eq!(annotated[0][StatColumn::Median.index()].value, Cell::Suppressed);
        assert_eq!(annotated[0][StatColumn::Median.index()].fill, Fill::Dark);
        assert_eq!(annotated[0][StatColumn::Mean.index()].value, Cell::Number(500.0));
        assert_eq!(annotated[0][StatColumn::Mean.index()].fill, Fill::Dark);
        assert_eq!(annotated[1][StatColumn::Median.index()].fill, Fill::None);
    }
}
