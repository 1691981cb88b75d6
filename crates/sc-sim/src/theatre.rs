//! Stages and their placement descriptors.
//!
//! A [`Theatre`] is built once by [`TheatreBuilder`] and never shrinks.
//! Iteration order is insertion order, which is also `StageId` order, so
//! every tick visits stages in the same sequence.

use sc_core::{Point3, Scalar, StageId, StageKeys};
use sc_motion::{Impulse, Itinerary, MotionResult, SteadyPace};

use crate::{SimError, SimResult};

// ── Stage metadata ────────────────────────────────────────────────────────────

/// Identity of one stage as it appears in published snapshots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stage {
    /// 32 lowercase hex characters, derived from the theatre seed.
    pub key:   String,
    pub label: String,
    pub class: String,
}

// ── Descriptors ───────────────────────────────────────────────────────────────

/// A stationary stage.  Other stages "collide" with it when they come within
/// `reach` of `position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fixed {
    pub position: Point3,
    pub reach:    Scalar,
}

/// A stage that follows an itinerary.
#[derive(Clone, Debug)]
pub struct Mobile {
    pub router: SteadyPace,
    pub reach:  Scalar,
}

/// How a stage is positioned each tick.
#[derive(Clone, Debug)]
pub enum Role {
    Fixed(Fixed),
    Mobile(Mobile),
}

impl Role {
    pub fn reach(&self) -> Scalar {
        match self {
            Role::Fixed(f)  => f.reach,
            Role::Mobile(m) => m.reach,
        }
    }

    pub fn as_fixed(&self) -> Option<&Fixed> {
        match self {
            Role::Fixed(f)  => Some(f),
            Role::Mobile(_) => None,
        }
    }
}

// ── Theatre ───────────────────────────────────────────────────────────────────

/// All stages of one run, indexed by [`StageId`].
#[derive(Clone, Debug, Default)]
pub struct Theatre {
    stages: Vec<Stage>,
    roles:  Vec<Role>,
}

impl Theatre {
    #[inline]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn contains(&self, id: StageId) -> bool {
        id.index() < self.stages.len()
    }

    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.get(id.index())
    }

    pub fn role(&self, id: StageId) -> Option<&Role> {
        self.roles.get(id.index())
    }

    /// Every stage in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (StageId, &Stage, &Role)> + '_ {
        self.stages
            .iter()
            .zip(&self.roles)
            .enumerate()
            .map(|(i, (stage, role))| (StageId(i as u32), stage, role))
    }

    /// Fixed stages only, in insertion order.
    pub fn fixed(&self) -> impl Iterator<Item = (StageId, &Fixed)> + '_ {
        self.roles
            .iter()
            .enumerate()
            .filter_map(|(i, role)| role.as_fixed().map(|f| (StageId(i as u32), f)))
    }

    /// Position every stage for simulation time `ts` of a run that began at
    /// `start`.
    ///
    /// The returned iterator is lazy: mobile routers advance only as it is
    /// consumed.  On the first tick (`ts == start`) each router is primed
    /// before it is advanced, and yields nothing that tick.
    pub fn movement(&mut self, start: Scalar, ts: Scalar) -> Movement<'_> {
        Movement { roles: self.roles.iter_mut().enumerate(), start, ts }
    }
}

/// Lazy per-tick movement over a [`Theatre`].  See [`Theatre::movement`].
pub struct Movement<'a> {
    roles: std::iter::Enumerate<std::slice::IterMut<'a, Role>>,
    start: Scalar,
    ts:    Scalar,
}

impl Iterator for Movement<'_> {
    type Item = MotionResult<(StageId, Impulse)>;

    fn next(&mut self) -> Option<Self::Item> {
        for (i, role) in self.roles.by_ref() {
            let id = StageId(i as u32);
            match role {
                Role::Fixed(f) => return Some(Ok((id, Impulse::fixed(self.start, f.position)))),
                Role::Mobile(m) => {
                    if self.ts == self.start {
                        m.router.prime();
                    }
                    match m.router.advance(self.ts) {
                        Ok(Some(imp)) => return Some(Ok((id, imp))),
                        Ok(None)      => continue,
                        Err(e)        => return Some(Err(e)),
                    }
                }
            }
        }
        None
    }
}

// ── TheatreBuilder ────────────────────────────────────────────────────────────

/// Incremental [`Theatre`] construction.
///
/// Stage keys are drawn from `seed`, so the same builder calls always
/// produce the same keys.
///
/// ```rust,ignore
/// let mut b = TheatreBuilder::new(42);
/// let zone = b.fixed("A", "zone", Point3::new(285, 60, 0), dec!(45))?;
/// let bus  = b.mobile("Bus", "vehicle", Itinerary::circuit(&waypoints, dec!(24))?, dec!(10))?;
/// let theatre = b.build();
/// ```
pub struct TheatreBuilder {
    keys:    StageKeys,
    theatre: Theatre,
}

impl TheatreBuilder {
    pub fn new(seed: u64) -> Self {
        Self { keys: StageKeys::new(seed), theatre: Theatre::default() }
    }

    /// Add a stationary stage.
    pub fn fixed(
        &mut self,
        label:    impl Into<String>,
        class:    impl Into<String>,
        position: Point3,
        reach:    Scalar,
    ) -> SimResult<StageId> {
        self.push(label.into(), class.into(), reach, |reach| Role::Fixed(Fixed { position, reach }))
    }

    /// Add a stage that follows `itinerary`.
    pub fn mobile(
        &mut self,
        label:     impl Into<String>,
        class:     impl Into<String>,
        itinerary: Itinerary,
        reach:     Scalar,
    ) -> SimResult<StageId> {
        self.push(label.into(), class.into(), reach, |reach| {
            Role::Mobile(Mobile { router: SteadyPace::new(itinerary), reach })
        })
    }

    pub fn build(self) -> Theatre {
        self.theatre
    }

    fn push(
        &mut self,
        label: String,
        class: String,
        reach: Scalar,
        role:  impl FnOnce(Scalar) -> Role,
    ) -> SimResult<StageId> {
        if reach < Scalar::ZERO {
            return Err(SimError::NegativeReach { label, reach });
        }
        let id = StageId::try_from(self.theatre.len()).map_err(|_| SimError::TheatreFull)?;
        self.theatre.stages.push(Stage { key: self.keys.key(id), label, class });
        self.theatre.roles.push(role(reach));
        Ok(id)
    }
}
