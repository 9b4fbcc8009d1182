//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert them into
//! `ApiaryError` via `From` impls or keep them separate.  Both patterns are
//! acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{BeeId, HiveId, PatchId};

/// The top-level error type for `apiary-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum ApiaryError {
    #[error("bee {0} not found or dead")]
    BeeNotFound(BeeId),

    #[error("hive {0} not found")]
    HiveNotFound(HiveId),

    #[error("resource patch {0} not found or depleted")]
    PatchNotFound(PatchId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `apiary-*` crates.
pub type ApiaryResult<T> = Result<T, ApiaryError>;
