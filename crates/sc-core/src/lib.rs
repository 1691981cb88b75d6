//! `sc-core`: foundational types for the stagecraft workspace.
//!
//! This crate is a dependency of every other `sc-*` crate.  It has no `sc-*`
//! dependencies and few external ones (`rust_decimal`, `rand`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                |
//! |-----------|---------------------------------------------------------|
//! | [`geom`]  | `Scalar`, `Vector3`, `Point3`: exact decimal arithmetic |
//! | [`ids`]   | `StageId`, `ActorId`                                    |
//! | [`time`]  | `Tick`, `RunConfig`                                     |
//! | [`rng`]   | `StageKeys`: seeded stage key generation                |
//! | [`error`] | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geom::{Point3, Scalar, Vector3};
pub use ids::{ActorId, StageId};
pub use rng::StageKeys;
pub use time::{RunConfig, Tick};
