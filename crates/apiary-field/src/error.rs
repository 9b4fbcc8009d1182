//! Field-subsystem error type.

use thiserror::Error;

/// Errors produced by `apiary-field`.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("invalid world extent {width} × {height} (must be positive and finite)")]
    InvalidExtent { width: f32, height: f32 },
}

pub type FieldResult<T> = Result<T, FieldError>;
