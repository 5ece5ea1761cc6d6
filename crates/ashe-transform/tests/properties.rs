//! Property tests for rounding, banding and variant independence.

use ashe_model::{
    BandingPolicy, CanonicalOrder, Cell, Fill, NormalizedRecord, StatColumn, StatRow,
};
use ashe_transform::{
    Band, apply_order, band_scores, make_safe, percentage_change, round_half_up, round_scaled,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn ties_at_one_decimal_round_up(whole in 0u32..100_000, tenth in 0u32..10) {
        let value: f64 = format!("{whole}.{tenth}5").parse().unwrap();
        let expected: f64 = {
            let scaled = u64::from(whole) * 10 + u64::from(tenth) + 1;
            format!("{}.{}", scaled / 10, scaled % 10).parse().unwrap()
        };
        prop_assert_eq!(round_half_up(value, 1), expected);
        prop_assert_eq!(round_half_up(-value, 1), -expected);
    }

    #[test]
    fn rounding_is_idempotent(value in -1.0e6f64..1.0e6) {
        let once = round_half_up(value, 1);
        prop_assert_eq!(round_half_up(once, 1), once);
    }

    #[test]
    fn rounding_moves_at_most_half_a_step(value in 0.0f64..1.0e6) {
        let rounded = round_half_up(value, 1);
        prop_assert!((rounded - value).abs() <= 0.05 + 1e-9);
    }

    #[test]
    fn thousands_match_integer_rounding(count in 0u64..10_000_000) {
        let expected = ((count + 500) / 1000) as f64;
        prop_assert_eq!(round_scaled(count as f64, 3, 0), expected);
    }

    #[test]
    fn every_score_falls_in_exactly_one_band(score in -10.0f64..1000.0) {
        let band = Band::classify(score);
        let expected = if score <= 0.0 {
            Band::Zero
        } else if score <= 5.0 {
            Band::Precise
        } else if score <= 10.0 {
            Band::Reasonable
        } else if score <= 20.0 {
            Band::Acceptable
        } else {
            Band::Unreliable
        };
        prop_assert_eq!(band, expected);
    }

    #[test]
    fn only_scores_over_twenty_differ_between_renderings(score in 0.0f64..100.0) {
        let row = StatRow::filled(&Cell::Number(score));
        let interim = band_scores(std::slice::from_ref(&row), BandingPolicy::SuppressOverTwenty);
        let fin = band_scores(std::slice::from_ref(&row), BandingPolicy::KeepValues);
        for (a, b) in interim[0].iter().zip(&fin[0]) {
            prop_assert_eq!(a.fill, b.fill);
            prop_assert_eq!(b.value.clone(), Cell::Number(score));
            if score > 20.0 {
                prop_assert_eq!(a.value.clone(), Cell::Suppressed);
                prop_assert_eq!(a.fill, Fill::Dark);
            } else {
                prop_assert_eq!(a.value.clone(), Cell::Number(score));
            }
        }
    }

    #[test]
    fn change_is_never_infinite(previous in -1000.0f64..1000.0, current in -1000.0f64..1000.0) {
        match percentage_change(previous, current) {
            Some(change) => prop_assert!(change.is_finite()),
            None => prop_assert!(previous == 0.0),
        }
    }
}

#[test]
fn masking_one_variant_leaves_siblings_untouched() {
    let records = vec![NormalizedRecord {
        code: "t A".to_string(),
        description: "A".to_string(),
        values: StatRow::filled(&Cell::Number(42.0)),
        safe: Cell::Number(0.0),
    }];
    let order: CanonicalOrder = [("t A", 1)].into_iter().collect();
    let merged = apply_order(&records, &order).records;

    let unsafe_copy = merged.clone();
    let safe_copy = make_safe(merged.clone());

    assert_eq!(safe_copy[0].values[StatColumn::Median], Cell::Empty);
    assert_eq!(unsafe_copy[0].values[StatColumn::Median], Cell::Number(42.0));
    assert_eq!(merged[0].values[StatColumn::Median], Cell::Number(42.0));
}
