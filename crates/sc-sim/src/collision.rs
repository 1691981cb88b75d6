//! Proximity detection between moving and fixed stages.
//!
//! A collision is recorded whenever a stage's impulse position lies strictly
//! inside a Fixed stage's reach.  Records accumulate across ticks in a
//! [`PendingMap`] keyed by the unordered stage pair; a repeat detection
//! overwrites the expiry.  Nothing is removed except by
//! [`Collisions::evict_expired`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use sc_core::{Scalar, StageId};
use sc_motion::Impulse;

use crate::Theatre;

// ── StagePair ─────────────────────────────────────────────────────────────────

/// An unordered pair of stages, stored as `(min, max)`.
///
/// Serialized as a two-element array; either order is accepted on input.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(from = "[StageId; 2]", into = "[StageId; 2]")]
pub struct StagePair(StageId, StageId);

impl StagePair {
    pub fn new(a: StageId, b: StageId) -> Self {
        if a <= b { Self(a, b) } else { Self(b, a) }
    }

    /// The lower id.
    #[inline]
    pub fn first(&self) -> StageId {
        self.0
    }

    /// The higher id.
    #[inline]
    pub fn second(&self) -> StageId {
        self.1
    }

    pub fn contains(&self, id: StageId) -> bool {
        self.0 == id || self.1 == id
    }

    /// The member of the pair that is not `id`, or `None` if `id` is not in
    /// the pair.
    pub fn other(&self, id: StageId) -> Option<StageId> {
        if id == self.0 {
            Some(self.1)
        } else if id == self.1 {
            Some(self.0)
        } else {
            None
        }
    }
}

impl From<[StageId; 2]> for StagePair {
    fn from([a, b]: [StageId; 2]) -> Self {
        Self::new(a, b)
    }
}

impl From<StagePair> for [StageId; 2] {
    fn from(pair: StagePair) -> Self {
        [pair.0, pair.1]
    }
}

impl fmt::Display for StagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.0, self.1)
    }
}

// ── Collisions ────────────────────────────────────────────────────────────────

/// Pending collisions and their expiry timestamps.
pub type PendingMap = BTreeMap<StagePair, Scalar>;

/// Cumulative collision detector for one run.
#[derive(Clone, Debug, Default)]
pub struct Collisions {
    pending: PendingMap,
}

impl Collisions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `stage` at `impulse.pos` against every other Fixed stage.
    ///
    /// For each Fixed `other` with `distance(pos, other) < other.reach`, the
    /// pair's expiry is set to `expiry`.  Returns the whole pending map.
    pub fn observe(
        &mut self,
        theatre: &Theatre,
        stage:   StageId,
        impulse: &Impulse,
        expiry:  Scalar,
    ) -> &PendingMap {
        for (other, fixed) in theatre.fixed().filter(|(other, _)| *other != stage) {
            if fixed.position.is_within(impulse.pos, fixed.reach) {
                self.pending.insert(StagePair::new(stage, other), expiry);
            }
        }
        &self.pending
    }

    /// Drop every entry whose expiry is before `ts`.  Returns how many went.
    pub fn evict_expired(&mut self, ts: Scalar) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, expiry| *expiry >= ts);
        before - self.pending.len()
    }

    pub fn pending(&self) -> &PendingMap {
        &self.pending
    }

    pub fn expiry(&self, pair: &StagePair) -> Option<Scalar> {
        self.pending.get(pair).copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
