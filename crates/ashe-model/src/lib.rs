//! Shared types for ASHE table assembly.
//!
//! Holds the static registry of published tables and variables, the nine
//! employee categories, and the cell/record types that flow between the
//! ingest, transform and output stages.

pub mod category;
pub mod cell;
pub mod error;
pub mod record;
pub mod registry;
pub mod variant;

pub use category::{Category, PerCategory};
pub use cell::Cell;
pub use error::{ModelError, Result};
pub use record::{
    CanonicalOrder, NormalizedRecord, OrderEntry, OrderedRecord, StatColumn, StatRow,
    normalize_code, prefixed_code,
};
pub use registry::{TableSpec, VariableSpec, table, tables, variable, variables};
pub use variant::{BandingPolicy, Fill, StyledCell, ValueKind, VariantKind};
