use std::fmt;

use serde::Serialize;

/// One published cell.
///
/// Placeholders are distinct variants so that "not collected" never collides
/// with a true zero and a suppression marker never passes for a number.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Cell {
    Number(f64),
    /// Raw text that could not be read as a number.
    Text(String),
    /// `.`: the statistic was not collected in the source extract.
    Unavailable,
    /// `:`: the code is in the template but not in the data.
    Absent,
    /// `..`: the row failed the reliability check.
    Unsafe,
    /// `x`: suppressed for disclosure control.
    Suppressed,
    #[default]
    Empty,
}

impl Cell {
    pub const UNAVAILABLE: &'static str = ".";
    pub const ABSENT: &'static str = ":";
    pub const UNSAFE: &'static str = "..";
    pub const SUPPRESSED: &'static str = "x";

    /// Maps a published placeholder symbol back to its variant.
    pub fn from_symbol(symbol: &str) -> Option<Cell> {
        match symbol {
            Self::UNAVAILABLE => Some(Cell::Unavailable),
            Self::ABSENT => Some(Cell::Absent),
            Self::UNSAFE => Some(Cell::Unsafe),
            Self::SUPPRESSED => Some(Cell::Suppressed),
            "" => Some(Cell::Empty),
            _ => None,
        }
    }

    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Cell::Unavailable => Some(Self::UNAVAILABLE),
            Cell::Absent => Some(Self::ABSENT),
            Cell::Unsafe => Some(Self::UNSAFE),
            Cell::Suppressed => Some(Self::SUPPRESSED),
            Cell::Empty => Some(""),
            Cell::Number(_) | Cell::Text(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Cell::Number(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(value) => write!(f, "{value}"),
            Cell::Text(text) => f.write_str(text),
            other => f.write_str(other.symbol().unwrap_or_default()),
        }
    }
}
