//! Library side of the `ashe-tables` binary.

pub mod logging;
