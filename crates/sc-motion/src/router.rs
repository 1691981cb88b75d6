//! Steady-pace waypoint following.
//!
//! A [`SteadyPace`] router moves one stage around a cyclic [`Itinerary`].  It
//! never computes positions itself: at the start of each leg it seeds its
//! [`Trajectory`] with one interpolated hop, and from then on it feeds back
//! the integrator's own output so the stage carries on at constant velocity
//! until it lands within tolerance of the leg's destination.
//!
//! # Call sequence
//!
//! ```text
//! prime()        Unprimed | any  -> Primed
//! advance(t0)    Primed          -> Departing   yields None
//! advance(t1)    Departing       -> Launched    feeds origin,        yields origin
//! advance(t2)    Launched        -> Cruising    feeds origin + hop
//! advance(tn)    Cruising        -> Cruising    feeds last position (integrated)
//!                                -> Arrived     when within tolerance of the destination
//! advance(tn+1)  Arrived         -> Cruising    feeds next leg's origin + hop (override)
//! ```

use sc_core::{Point3, Scalar, Vector3};
use tracing::debug;

use crate::{Impulse, MotionError, MotionResult, Trajectory};

// ── Leg ───────────────────────────────────────────────────────────────────────

/// One `origin -> destination` segment of an itinerary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Leg {
    pub origin:      Point3,
    pub destination: Point3,
}

impl Leg {
    #[inline]
    pub fn new(origin: Point3, destination: Point3) -> Self {
        Self { origin, destination }
    }

    /// The hop covered in `elapsed` when the whole leg takes `transit`.
    fn hop(&self, elapsed: Scalar, transit: Scalar) -> Vector3 {
        // `transit` is validated positive, so only overflow can fail here.
        ((self.destination - self.origin) * elapsed)
            .checked_div(transit)
            .unwrap_or(Vector3::ZERO)
    }
}

// ── Itinerary ─────────────────────────────────────────────────────────────────

/// Cyclic legs, cyclic transit durations, and an arrival tolerance.
///
/// Legs and transits cycle independently: leg `n` uses transit
/// `n % transits.len()`.
#[derive(Clone, Debug)]
pub struct Itinerary {
    legs:      Vec<Leg>,
    transits:  Vec<Scalar>,
    tolerance: Scalar,
}

impl Itinerary {
    pub const DEFAULT_TOLERANCE: Scalar = Scalar::ONE;

    pub fn new(legs: Vec<Leg>, transits: Vec<Scalar>) -> MotionResult<Self> {
        if legs.is_empty() {
            return Err(MotionError::NoLegs);
        }
        if transits.is_empty() {
            return Err(MotionError::NoTransits);
        }
        if let Some(&bad) = transits.iter().find(|t| **t <= Scalar::ZERO) {
            return Err(MotionError::NonPositiveTransit(bad));
        }
        Ok(Self { legs, transits, tolerance: Self::DEFAULT_TOLERANCE })
    }

    /// The closed loop `w0 -> w1 -> ... -> wn -> w0`, every leg taking
    /// `transit`.
    pub fn circuit(waypoints: &[Point3], transit: Scalar) -> MotionResult<Self> {
        if waypoints.len() < 2 {
            return Err(MotionError::ShortCircuit(waypoints.len()));
        }
        let legs = waypoints
            .iter()
            .zip(waypoints.iter().cycle().skip(1))
            .map(|(&origin, &destination)| Leg::new(origin, destination))
            .collect();
        Self::new(legs, vec![transit])
    }

    /// Replace the arrival tolerance (default 1).
    pub fn with_tolerance(mut self, tolerance: Scalar) -> MotionResult<Self> {
        if tolerance <= Scalar::ZERO {
            return Err(MotionError::NonPositiveTolerance(tolerance));
        }
        self.tolerance = tolerance;
        Ok(self)
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn transits(&self) -> &[Scalar] {
        &self.transits
    }

    pub fn tolerance(&self) -> Scalar {
        self.tolerance
    }

    /// Strict `distance < tolerance`, compared squared so the test is exact.
    fn within_tolerance(&self, pos: Point3, destination: Point3) -> bool {
        destination.is_within(pos, self.tolerance)
    }

    fn leg(&self, n: u64) -> Leg {
        self.legs[(n % self.legs.len() as u64) as usize]
    }

    fn transit(&self, n: u64) -> Scalar {
        self.transits[(n % self.transits.len() as u64) as usize]
    }
}

// ── SteadyPace ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Unprimed,
    Primed,
    Departing,
    Launched,
    Cruising,
    Arrived,
}

/// Router for one mobile stage.
#[derive(Clone, Debug)]
pub struct SteadyPace {
    itinerary:  Itinerary,
    trajectory: Trajectory,
    phase:      Phase,
    /// `ts` of the previous `advance` call.
    t_begin:    Scalar,
    hop:        Vector3,
    /// Index of the current leg, counting every leg taken since priming.
    leg_n:      u64,
    position:   Option<Point3>,
}

impl SteadyPace {
    pub fn new(itinerary: Itinerary) -> Self {
        Self {
            itinerary,
            trajectory: Trajectory::new(),
            phase:      Phase::Unprimed,
            t_begin:    Scalar::ZERO,
            hop:        Vector3::ZERO,
            leg_n:      0,
            position:   None,
        }
    }

    /// Ready the router for a new run, starting from the first leg.
    pub fn prime(&mut self) {
        self.trajectory.reset();
        self.phase = Phase::Primed;
        self.t_begin = Scalar::ZERO;
        self.hop = Vector3::ZERO;
        self.leg_n = 0;
        self.position = None;
    }

    /// Advance to simulation time `ts`.
    ///
    /// Returns `Ok(None)` on the first call after [`prime`](Self::prime)
    /// (there is no interval to cover yet) and the stage's new impulse on
    /// every later call.
    pub fn advance(&mut self, ts: Scalar) -> MotionResult<Option<Impulse>> {
        let t_begin = self.t_begin;
        let leg = self.leg();

        let fed = match self.phase {
            Phase::Unprimed => return Err(MotionError::NotPrimed),
            Phase::Primed => {
                self.t_begin = ts;
                self.phase = Phase::Departing;
                return Ok(None);
            }
            Phase::Departing => {
                self.hop = leg.hop(ts - t_begin, self.itinerary.transit(self.leg_n));
                leg.origin
            }
            Phase::Launched => leg.origin + self.hop,
            Phase::Cruising => self.position.unwrap_or(leg.origin),
            Phase::Arrived => {
                self.hop = leg.hop(ts - t_begin, self.itinerary.transit(self.leg_n));
                leg.origin + self.hop
            }
        };

        let imp = self.trajectory.step(Impulse::new(t_begin, ts, Vector3::ZERO, fed));
        self.t_begin = ts;
        self.position = Some(imp.pos);

        self.phase = match self.phase {
            Phase::Departing => Phase::Launched,
            _ if self.itinerary.within_tolerance(imp.pos, leg.destination) => {
                self.leg_n += 1;
                debug!(
                    legs_completed = self.leg_n,
                    arrived        = %leg.destination,
                    next           = %self.leg().destination,
                    "leg complete"
                );
                Phase::Arrived
            }
            _ => Phase::Cruising,
        };
        Ok(Some(imp))
    }

    /// The leg currently being travelled (or about to start, after arrival).
    pub fn leg(&self) -> Leg {
        self.itinerary.leg(self.leg_n)
    }

    /// Number of arrivals since the last [`prime`](Self::prime).
    pub fn legs_completed(&self) -> u64 {
        self.leg_n
    }

    /// Last emitted position, if any.
    pub fn position(&self) -> Option<Point3> {
        self.position
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    pub fn is_primed(&self) -> bool {
        self.phase != Phase::Unprimed
    }
}
