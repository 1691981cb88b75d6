//! `sc-publish`: delivers each Shifter tick to readers.
//!
//! Four delivery modes, one per [`Delivery`] variant:
//!
//! | Variant     | Effect                                                      |
//! |-------------|-------------------------------------------------------------|
//! | `Attribute` | value mirrored into the shared [`PublicInterface`]          |
//! | `Event`     | [`Signal`] set while the value is truthy, cleared otherwise |
//! | `Hateoas`   | pretty JSON document written atomically to an [`Endpoint`]  |
//! | `Rson`      | one compact JSON line per list element, written atomically |
//!
//! [`Publisher`] implements `sc_sim::Publish`, so it plugs straight into a
//! `Shifter`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sc_publish::{PublicInterface, PublishConfig, Publisher};
//!
//! let public = Arc::new(PublicInterface::new());
//! let publisher = Publisher::new(PublishConfig::for_shifter(Path::new("./out")), public.clone());
//! let mut shifter = ShifterBuilder::new(theatre, publisher).build()?;
//! shifter.run(start, stop, step).await?;
//! public.event("colliding").map(|s| s.is_set());
//! ```

pub mod delivery;
pub mod endpoint;
pub mod error;
pub mod public;
pub mod publisher;
pub mod signal;


pub use delivery::{Delivery, PublishConfig, truthy};
pub use endpoint::{Endpoint, SharedBuffer};
pub use error::{PublishError, PublishResult};
pub use public::PublicInterface;
pub use publisher::Publisher;
pub use signal::Signal;
