use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;

/// Which kind of figure an extract carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueKind {
    /// Published estimates (`Values` extracts, `a` tables).
    PointEstimate,
    /// Coefficients of variation (`CVs` extracts, `b` tables).
    ReliabilityScore,
}

impl ValueKind {
    pub const ALL: [ValueKind; 2] = [ValueKind::PointEstimate, ValueKind::ReliabilityScore];

    /// Label used in extract file names.
    pub fn file_label(self) -> &'static str {
        match self {
            ValueKind::PointEstimate => "Values",
            ValueKind::ReliabilityScore => "CVs",
        }
    }

    /// Suffix appended to the table sub-number.
    pub fn table_suffix(self) -> char {
        match self {
            ValueKind::PointEstimate => 'a',
            ValueKind::ReliabilityScore => 'b',
        }
    }

    pub fn from_file_label(label: &str) -> Option<Self> {
        ValueKind::ALL
            .into_iter()
            .find(|kind| kind.file_label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_label())
    }
}

/// The six renderings produced for each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum VariantKind {
    CvUnsafe,
    ValueUnsafe,
    ValueSafe,
    /// Main CV table with scores over 20 replaced by `x`.
    CvMainInterim,
    /// Main CV table keeping every score, banded only.
    CvMainFinal,
    /// Main value table with year-on-year columns and CV annotations.
    ValueMain,
}

impl VariantKind {
    pub const ALL: [VariantKind; 6] = [
        VariantKind::CvUnsafe,
        VariantKind::ValueUnsafe,
        VariantKind::ValueSafe,
        VariantKind::CvMainInterim,
        VariantKind::CvMainFinal,
        VariantKind::ValueMain,
    ];

    pub fn value_kind(self) -> ValueKind {
        match self {
            VariantKind::CvUnsafe | VariantKind::CvMainInterim | VariantKind::CvMainFinal => {
                ValueKind::ReliabilityScore
            }
            VariantKind::ValueUnsafe | VariantKind::ValueSafe | VariantKind::ValueMain => {
                ValueKind::PointEstimate
            }
        }
    }

    /// Trailing part of the output file name, after the year.
    pub fn file_tag(self) -> &'static str {
        match self {
            VariantKind::CvUnsafe => " CV Unsafe",
            VariantKind::ValueUnsafe => " Unsafe",
            VariantKind::ValueSafe => " Safe",
            VariantKind::CvMainInterim => " CV Interim",
            VariantKind::CvMainFinal => " CV",
            VariantKind::ValueMain => "",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            VariantKind::CvUnsafe => "cv-unsafe",
            VariantKind::ValueUnsafe => "value-unsafe",
            VariantKind::ValueSafe => "value-safe",
            VariantKind::CvMainInterim => "cv-main-interim",
            VariantKind::CvMainFinal => "cv-main-final",
            VariantKind::ValueMain => "value-main",
        };
        f.write_str(label)
    }
}

/// Cell colouring attached to a rendered cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Fill {
    #[default]
    None,
    Light,
    Dark,
}

/// A rendered cell with its colouring.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StyledCell {
    pub value: Cell,
    pub fill: Fill,
}

impl StyledCell {
    pub fn plain(value: Cell) -> Self {
        Self {
            value,
            fill: Fill::None,
        }
    }
}

/// How the main CV rendering treats scores above 20.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandingPolicy {
    SuppressOverTwenty,
    KeepValues,
}

impl BandingPolicy {
    pub fn suppresses(self) -> bool {
        self == BandingPolicy::SuppressOverTwenty
    }
}
