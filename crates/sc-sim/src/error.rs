use sc_core::{CoreError, Scalar, StageId};
use sc_motion::MotionError;
use thiserror::Error;

use crate::BoxError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("run configuration error: {0}")]
    Run(#[from] CoreError),

    #[error("shifter configuration error: {0}")]
    Config(String),

    #[error("motion error: {0}")]
    Motion(#[from] MotionError),

    #[error("publish failed: {0}")]
    Publish(#[source] BoxError),

    #[error("stage {label:?} has negative reach {reach}")]
    NegativeReach { label: String, reach: Scalar },

    #[error("unknown {0}")]
    UnknownStage(StageId),

    #[error("theatre cannot hold more than {} stages", u32::MAX)]
    TheatreFull,
}

pub type SimResult<T> = Result<T, SimError>;
