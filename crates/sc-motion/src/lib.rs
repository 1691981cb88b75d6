//! `sc-motion`: exact trajectory integration and waypoint routing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                             |
//! |----------------|------------------------------------------------------|
//! | [`impulse`]    | `Impulse`: motion record over one time interval      |
//! | [`integrator`] | `Trajectory`: time-corrected Verlet state machine    |
//! | [`router`]     | `Itinerary`, `SteadyPace`: cyclic waypoint following |
//! | [`error`]      | `MotionError`, `MotionResult<T>`                     |
//!
//! # Movement model
//!
//! 1. A caller feeds a `Trajectory` one `Impulse` per sample.  The first two
//!    establish position and velocity; from the third on the integrator
//!    predicts the next position from the last two, correcting for unequal
//!    step lengths.
//! 2. A caller that knows better (e.g. a router switching legs) supplies an
//!    impulse whose position differs from the last output.  The integrator
//!    accepts it verbatim and continues the recurrence from there.
//! 3. `SteadyPace` uses exactly that: it seeds each leg with one
//!    interpolated hop and lets the integrator carry the stage on at constant
//!    velocity until it lands within tolerance of the leg's destination.

pub mod error;
pub mod impulse;
pub mod integrator;
pub mod router;

#[cfg(test)]
mod tests;

pub use error::{MotionError, MotionResult};
pub use impulse::Impulse;
pub use integrator::{Trajectory, TrajectoryState};
pub use router::{Itinerary, Leg, SteadyPace};
