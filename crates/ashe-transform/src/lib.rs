//! Table transforms for ASHE publication.
//!
//! Each stage is a plain function over owned or borrowed rows:
//! [`normalize_dataset`] rounds and encodes placeholders, [`apply_order`]
//! places rows in template order, [`compare_years`] fills the year-on-year
//! columns, and the [`disclosure`] functions mask and band the result.

pub mod compare;
pub mod disclosure;
pub mod normalize;
pub mod order;
pub mod rounding;

pub use compare::{Comparison, clear_changes, compare_years, percentage_change};
pub use disclosure::{
    Band, POPULATION_THRESHOLD, StyledRow, annotate_estimates, band_scores, make_safe,
    mask_low_population, plain_rows, publish_rows,
};
pub use normalize::normalize_dataset;
pub use order::{Merged, apply_order, placeholder};
pub use rounding::{round_half_up, round_scaled};
