//! The six renderings of one category.

use ashe_model::{
    BandingPolicy, CanonicalOrder, Category, NormalizedRecord, ValueKind, VariantKind,
};
use ashe_transform::{
    Comparison, Merged, StyledRow, annotate_estimates, apply_order, band_scores, clear_changes,
    compare_years, make_safe, mask_low_population, plain_rows, publish_rows,
};
use tracing::{debug, warn};

use crate::report::JobWarning;

/// Normalized datasets for one category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryData<'a> {
    pub cv: &'a [NormalizedRecord],
    pub value: &'a [NormalizedRecord],
    /// Last year's point estimates, when they exist.
    pub previous: Option<&'a [NormalizedRecord]>,
}

/// Rendered rows of every variant for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTables {
    pub category: Category,
    pub cv_unsafe: Vec<StyledRow>,
    pub value_unsafe: Vec<StyledRow>,
    pub value_safe: Vec<StyledRow>,
    pub cv_interim: Vec<StyledRow>,
    pub cv_final: Vec<StyledRow>,
    pub value_main: Vec<StyledRow>,
}

impl CategoryTables {
    pub fn rows(&self, variant: VariantKind) -> &[StyledRow] {
        match variant {
            VariantKind::CvUnsafe => &self.cv_unsafe,
            VariantKind::ValueUnsafe => &self.value_unsafe,
            VariantKind::ValueSafe => &self.value_safe,
            VariantKind::CvMainInterim => &self.cv_interim,
            VariantKind::CvMainFinal => &self.cv_final,
            VariantKind::ValueMain => &self.value_main,
        }
    }
}

fn check_matched(
    merged: &Merged,
    category: Category,
    value_kind: ValueKind,
    warnings: &mut Vec<JobWarning>,
) {
    if merged.unplaced > 0 {
        debug!(
            category = %category,
            value_kind = %value_kind,
            unplaced = merged.unplaced,
            "dropped codes not in template"
        );
    }
    if merged.is_empty_result() {
        warn!(category = %category, value_kind = %value_kind, "no rows matched the template");
        warnings.push(JobWarning::EmptyResult {
            category,
            value_kind,
        });
    }
}

/// Orders, compares, masks and bands one category.
///
/// Each variant starts from its own copy of the ordered rows.
pub fn render_category(
    category: Category,
    order: &CanonicalOrder,
    data: CategoryData<'_>,
    warnings: &mut Vec<JobWarning>,
) -> CategoryTables {
    let cv = apply_order(data.cv, order);
    check_matched(&cv, category, ValueKind::ReliabilityScore, warnings);
    let value = apply_order(data.value, order);
    check_matched(&value, category, ValueKind::PointEstimate, warnings);

    let mut main = apply_order(&mask_low_population(data.value.to_vec()), order).records;
    match data.previous {
        Some(previous) => {
            let previous = apply_order(previous, order);
            if let Comparison::CodeMismatch { current, previous } =
                compare_years(&mut main, &previous.records)
            {
                warn!(
                    category = %category,
                    current,
                    previous,
                    "code sequence differs from previous year"
                );
                warnings.push(JobWarning::CodeAlignment {
                    category,
                    current,
                    previous,
                });
            }
        }
        None => clear_changes(&mut main),
    }

    let cv_unsafe = publish_rows(&cv.records);
    let value_unsafe = publish_rows(&value.records);
    let value_safe = publish_rows(&make_safe(value.records));

    let cv_main = publish_rows(&make_safe(cv.records));
    let cv_interim = band_scores(&cv_main, BandingPolicy::SuppressOverTwenty);
    let cv_final = band_scores(&cv_main, BandingPolicy::KeepValues);
    let value_main = annotate_estimates(&publish_rows(&make_safe(main)), &cv_interim);

    CategoryTables {
        category,
        cv_unsafe: plain_rows(&cv_unsafe),
        value_unsafe: plain_rows(&value_unsafe),
        value_safe: plain_rows(&value_safe),
        cv_interim,
        cv_final,
        value_main,
    }
}
