//! Workspace base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` where a core
//! validation can fail underneath them.

use thiserror::Error;

use crate::Scalar;

/// The error type for `sc-core` validation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("step must be positive, got {0}")]
    NonPositiveStep(Scalar),

    #[error("run is empty: start {start} is not before stop {stop}")]
    EmptyRun { start: Scalar, stop: Scalar },
}

/// Shorthand result type for `sc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
