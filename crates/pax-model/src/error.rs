//! Error types for pax-model.

use thiserror::Error;

/// Errors from model construction and roster loading.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid flight: {0}")]
    InvalidFlight(String),

    #[error("duplicate flight number {0:?}")]
    DuplicateFlight(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] pax_core::CoreError),
}

/// Alias for `Result<T, ModelError>`.
pub type ModelResult<T> = Result<T, ModelError>;
