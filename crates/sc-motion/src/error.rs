use sc_core::Scalar;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("itinerary has no legs")]
    NoLegs,

    #[error("itinerary has no transit durations")]
    NoTransits,

    #[error("transit duration must be positive, got {0}")]
    NonPositiveTransit(Scalar),

    #[error("arrival tolerance must be positive, got {0}")]
    NonPositiveTolerance(Scalar),

    #[error("circuit needs at least two waypoints, got {0}")]
    ShortCircuit(usize),

    #[error("router advanced before it was primed")]
    NotPrimed,
}

pub type MotionResult<T> = Result<T, MotionError>;
