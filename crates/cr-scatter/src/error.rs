//! Error types for cr-scatter.

use cr_fleet::FleetError;
use thiserror::Error;

/// Errors raised while reading, writing, or converting scatter data.
#[derive(Debug, Error)]
pub enum ScatterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended partway through a record.
    #[error("{what} record {index} is truncated")]
    Truncated { what: &'static str, index: usize },

    #[error("invalid generator parameters: {0}")]
    Params(String),

    #[error("invalid scatter record: {0}")]
    Fleet(#[from] FleetError),
}

/// Alias for `Result<T, ScatterError>`.
pub type ScatterResult<T> = Result<T, ScatterError>;
