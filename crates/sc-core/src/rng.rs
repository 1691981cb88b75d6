//! Deterministic stage key generation.
//!
//! # Determinism strategy
//!
//! Each stage's key is drawn from its own `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (stage_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stage IDs uniformly across the seed space.
//! This means:
//!
//! - The same seed always reproduces the same keys, so published snapshots
//!   are comparable between runs.
//! - Adding stages at the end of a theatre does not disturb the keys of
//!   existing stages.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::StageId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Generates the 128-bit hex key (`uuid` in snapshots) for each stage.
#[derive(Copy, Clone, Debug)]
pub struct StageKeys {
    seed: u64,
}

impl StageKeys {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// 32 lowercase hex characters, fixed for a given `(seed, stage)`.
    pub fn key(&self, stage: StageId) -> String {
        let mixed = self.seed ^ (stage.0 as u64).wrapping_mul(MIXING_CONSTANT);
        let mut rng = SmallRng::seed_from_u64(mixed);
        let hi: u64 = rng.r#gen();
        let lo: u64 = rng.r#gen();
        format!("{hi:016x}{lo:016x}")
    }
}
