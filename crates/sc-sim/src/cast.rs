//! Placement of actors on stages.

use std::collections::BTreeMap;

use serde::Serialize;

use sc_core::{ActorId, StageId};

/// `ActorId -> StageId`, one stage per actor.
///
/// Serialized as a JSON object keyed by actor index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cast {
    placements: BTreeMap<ActorId, StageId>,
}

impl Cast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `actor` on `stage`, returning the stage it was on before.
    pub fn place(&mut self, actor: ActorId, stage: StageId) -> Option<StageId> {
        self.placements.insert(actor, stage)
    }

    pub fn stage_of(&self, actor: ActorId) -> Option<StageId> {
        self.placements.get(&actor).copied()
    }

    /// Actors currently on `stage`, in id order.
    pub fn actors_on(&self, stage: StageId) -> impl Iterator<Item = ActorId> + '_ {
        self.placements
            .iter()
            .filter(move |(_, s)| **s == stage)
            .map(|(a, _)| *a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ActorId, StageId)> + '_ {
        self.placements.iter().map(|(a, s)| (*a, *s))
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}
