use thiserror::Error;

/// Registry lookup failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown table: {name}")]
    UnknownTable { name: String },
    #[error("unknown variable: {name}")]
    UnknownVariable { name: String },
    #[error("unknown category: {label}")]
    UnknownCategory { label: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
