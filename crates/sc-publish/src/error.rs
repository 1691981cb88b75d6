//! Error types for sc-publish.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while publishing a tick.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not move snapshot into place at {path}: {source}")]
    Persist {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("field {field:?} reads {attr:?}, which the tick does not provide")]
    MissingValue { field: String, attr: String },

    #[error("field {field:?} needs a list for RSON delivery, got {kind}")]
    NotAList { field: String, kind: &'static str },
}

/// Alias for `Result<T, PublishError>`.
pub type PublishResult<T> = Result<T, PublishError>;
