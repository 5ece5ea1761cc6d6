//! Errors that abort a table x variable job.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error(transparent)]
    Model(#[from] ashe_model::ModelError),

    #[error(transparent)]
    Ingest(#[from] ashe_ingest::IngestError),

    #[error(transparent)]
    Output(#[from] ashe_output::OutputError),
}

pub type Result<T> = std::result::Result<T, AssembleError>;
