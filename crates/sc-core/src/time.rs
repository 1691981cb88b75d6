//! Simulation time model.
//!
//! # Design
//!
//! Simulation time is a [`Scalar`] (exact decimal), not an integer counter:
//! the integrator needs the real interval lengths between samples, and a
//! step such as `0.1` must add up to exactly `0.3` after three ticks.
//!
//! A run is described by `(start, stop, step)`.  The orchestrator visits
//! `ts = start, start + step, …` while `ts < stop` and reports each completed
//! pass as a [`Tick`].

use std::fmt;

use crate::{CoreError, CoreResult, Scalar};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// One completed pass of the orchestrator loop.
///
/// `ts` is the simulation time that pass reached.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick {
    pub start: Scalar,
    pub stop:  Scalar,
    pub step:  Scalar,
    pub ts:    Scalar,
}

impl Tick {
    /// `true` if the pass after this one would reach or pass `stop`.
    #[inline]
    pub fn is_final(&self) -> bool {
        self.ts + self.step >= self.stop
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={} [{}..{} by {}]", self.ts, self.start, self.stop, self.step)
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// The span of one simulation run.
///
/// Typically built by the application from command-line or file settings
/// and handed to the orchestrator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Simulation time of the first tick.
    pub start: Scalar,
    /// Exclusive upper bound on `ts`.  `Scalar::MAX` means "run forever".
    pub stop:  Scalar,
    /// Simulation time added after every tick.  Must be positive.
    pub step:  Scalar,
}

impl RunConfig {
    pub fn new(start: Scalar, stop: Scalar, step: Scalar) -> Self {
        Self { start, stop, step }
    }

    /// A run from `start` with no stop time.
    pub fn unbounded(start: Scalar, step: Scalar) -> Self {
        Self { start, stop: Scalar::MAX, step }
    }

    /// Reject spans the orchestrator cannot execute.
    pub fn validate(&self) -> CoreResult<()> {
        if self.step <= Scalar::ZERO {
            return Err(CoreError::NonPositiveStep(self.step));
        }
        if self.start >= self.stop {
            return Err(CoreError::EmptyRun { start: self.start, stop: self.stop });
        }
        Ok(())
    }

    /// The tick record for a pass that reached `ts`.
    #[inline]
    pub fn tick_at(&self, ts: Scalar) -> Tick {
        Tick { start: self.start, stop: self.stop, step: self.step, ts }
    }
}
