//! Time-corrected Verlet position integration.
//!
//! Reference: Jonathan "lonesock" Dummer, *A Simple Time-Corrected Verlet
//! Integration Method*.
//!
//! Plain Verlet assumes every step has the same length.  The time-corrected
//! form scales the previous displacement by the ratio of the two most recent
//! step lengths:
//!
//! ```text
//! x[n+1] = x[n] + (x[n] - x[n-1]) * dt[n] / dt[n-1] + a[n] * dt[n]²
//! ```
//!
//! Only the two most recent impulses are kept, so memory per trajectory is
//! constant regardless of run length.

use sc_core::{Point3, Scalar};
use tracing::trace;

use crate::Impulse;

/// Externally visible phase of a [`Trajectory`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrajectoryState {
    /// Nothing integrated yet.  The next impulse fixes the initial position.
    Empty,
    /// One impulse seen.  The next one fixes the initial velocity.
    OneImpulse,
    /// Two impulses held; every further step is integrated.
    Steady,
}

#[derive(Copy, Clone, Debug)]
enum Memory {
    Empty,
    One(Impulse),
    /// Two impulses held, none integrated yet.  The next step always
    /// integrates, whatever position it carries.
    Seeded { latest: Impulse, previous: Impulse },
    Two { latest: Impulse, previous: Impulse },
}

/// A resumable integrator for one moving body.
///
/// Drive it with [`step`](Self::step), one impulse per sample, with
/// non-decreasing `t_end` values.  Each call returns the impulse that now
/// describes the body.
#[derive(Clone, Debug)]
pub struct Trajectory {
    memory: Memory,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new()
    }
}

impl Trajectory {
    pub fn new() -> Self {
        Self { memory: Memory::Empty }
    }

    pub fn state(&self) -> TrajectoryState {
        match self.memory {
            Memory::Empty      => TrajectoryState::Empty,
            Memory::One(_)     => TrajectoryState::OneImpulse,
            Memory::Seeded { .. } | Memory::Two { .. } => TrajectoryState::Steady,
        }
    }

    /// The most recent impulse, if any.
    pub fn latest(&self) -> Option<&Impulse> {
        match &self.memory {
            Memory::Empty                  => None,
            Memory::One(latest)            => Some(latest),
            Memory::Seeded { latest, .. }  => Some(latest),
            Memory::Two { latest, .. }     => Some(latest),
        }
    }

    /// Forget all history.
    pub fn reset(&mut self) {
        self.memory = Memory::Empty;
    }

    /// Feed the next impulse and return the body's new impulse.
    ///
    /// - `Empty`, `OneImpulse`: `input` is stored and returned unchanged.
    /// - First `Steady` step: always integrated from the two stored
    ///   impulses; `input` contributes only `t_end` and `accel`.
    /// - Later steps with `input.pos != latest.pos`: position override.
    ///   `input` replaces the prediction and is returned unchanged.
    /// - Later steps otherwise: integrated as above.
    pub fn step(&mut self, input: Impulse) -> Impulse {
        let (next, memory) = match self.memory {
            Memory::Empty => (input, Memory::One(input)),
            Memory::One(first) => (input, Memory::Seeded { latest: input, previous: first }),
            Memory::Seeded { latest, previous } => {
                let next = time_corrected_verlet(&latest, &previous, input);
                (next, Memory::Two { latest: next, previous: latest })
            }
            Memory::Two { latest, .. } if input.pos != latest.pos => {
                trace!(from = %latest.pos, to = %input.pos, "position override");
                (input, Memory::Two { latest: input, previous: latest })
            }
            Memory::Two { latest, previous } => {
                let next = time_corrected_verlet(&latest, &previous, input);
                (next, Memory::Two { latest: next, previous: latest })
            }
        };
        self.memory = memory;
        next
    }
}

/// One integration step from `latest` and `previous`.
///
/// Both intervals enter as `t_begin - t_end` (zero or negative); only their
/// ratio and the square of the latest one matter.  If the ratio is undefined
/// (zero-length previous interval, or overflow) it is taken as 1.
fn time_corrected_verlet(latest: &Impulse, previous: &Impulse, input: Impulse) -> Impulse {
    let dt0: Scalar = latest.t_begin - latest.t_end;
    let dt_minus1: Scalar = previous.t_begin - previous.t_end;
    let leap = latest.accel * (dt0 * dt0);
    let drift = latest.pos - previous.pos;

    let carried = (drift * dt0).checked_div(dt_minus1).unwrap_or(drift);
    let pos: Point3 = latest.pos + carried + leap;

    Impulse::new(latest.t_end, input.t_end, input.accel, pos)
}
