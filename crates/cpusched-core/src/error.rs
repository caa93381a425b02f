use crate::types::ProcessId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimError {
    #[error("no processes supplied")]
    EmptyInput,

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("process {id} has a zero burst time")]
    ZeroBurst { id: ProcessId },

    #[error("process id {0} appears more than once")]
    DuplicateId(ProcessId),

    #[error("latest arrival plus total burst time overflows the clock")]
    TimeOverflow,

    #[error("round robin requires a time quantum")]
    MissingQuantum,

    #[error("time quantum must be at least 1")]
    ZeroQuantum,

    #[error("unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),
}
