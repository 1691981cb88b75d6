//! Typed indices for stages and actors.
//!
//! `StageId` is the insertion index of a stage in its theatre, so iterating
//! ids in ascending order reproduces insertion order.  `ActorId` names a cast
//! member.  Both serialize as bare integers, which is the form relocation
//! requests use on the wire.

use std::fmt;

/// Define an id over `$inner` that displays as `"<noun> <n>"`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $noun:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Never handed out by a builder.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Position in the owning collection.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($noun, " {}"), self.0)
            }
        }

        /// Fails once the collection outgrows the id's integer range.
        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a stage in its theatre, in insertion order.
    pub struct StageId(u32) = "stage";
}

typed_id! {
    /// Index of an actor in the cast placed on stages.
    pub struct ActorId(u32) = "actor";
}
