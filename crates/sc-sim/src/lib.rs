//! `sc-sim`: theatre, collision detection, and the Shifter tick loop.
//!
//! # Tick loop
//!
//! ```text
//! ts = start
//! while ts < stop:
//!   ① Requests: drain the inbox; validate and apply MoveRequests to the cast.
//!   ② Movement: Fixed stages restate their position; each Mobile router
//!               advances (primed first on the opening tick).
//!   ③ Evict: drop pending collisions whose expiry is before ts.
//!   ④ Detect: every positioned stage against every Fixed reach;
//!             hits are pending until ts + collision_window.
//!   ⑤ Publish: one Page + TickScope through the Publish contract.
//!   ts += step; wait per Pacing.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`theatre`]   | `Theatre`, `TheatreBuilder`, `Stage`, `Fixed`, `Mobile` |
//! | [`collision`] | `StagePair`, `Collisions`, `PendingMap`                 |
//! | [`cast`]      | `Cast`: actor placements                                |
//! | [`request`]   | `MoveRequest`, `RequestSource`, `LineSource`, `watch`   |
//! | [`snapshot`]  | `Page`, `PageItem`, `PageOption`, `TickScope`           |
//! | [`observer`]  | `Publish` contract, `NoopPublisher`                     |
//! | [`shifter`]   | `Shifter`, `ShifterConfig`, `Pacing`                    |
//! | [`builder`]   | `ShifterBuilder`                                        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sc_sim::{NoopPublisher, Pacing, ShifterBuilder, TheatreBuilder};
//!
//! let mut tb = TheatreBuilder::new(42);
//! tb.fixed("A", "zone", Point3::new(285, 60, 0), dec!(45))?;
//! tb.mobile("Bus", "vehicle", itinerary, dec!(10))?;
//! let mut shifter = ShifterBuilder::new(tb.build(), NoopPublisher)
//!     .pacing(Pacing::Immediate)
//!     .build()?;
//! let last = shifter.run(dec!(0), dec!(100), dec!(1)).await?;
//! ```

pub mod builder;
pub mod cast;
pub mod collision;
pub mod error;
pub mod observer;
pub mod request;
pub mod shifter;
pub mod snapshot;
pub mod theatre;


pub use builder::ShifterBuilder;
pub use cast::Cast;
pub use collision::{Collisions, PendingMap, StagePair};
pub use error::{SimError, SimResult};
pub use observer::{BoxError, NoopPublisher, Publish};
pub use request::{LineSource, MoveRequest, RequestRejected, RequestSource, watch};
pub use shifter::{Pacing, RunState, Shifter, ShifterConfig};
pub use snapshot::{Page, PageInfo, PageItem, PageOption, TickScope};
pub use theatre::{Fixed, Mobile, Movement, Role, Stage, Theatre, TheatreBuilder};
