//! Simulation-level error type.

use apiary_field::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("world configuration error: {0}")]
    Config(String),

    #[error("field error: {0}")]
    Field(#[from] FieldError),
}

pub type SimResult<T> = Result<T, SimError>;
