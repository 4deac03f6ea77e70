//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  `NodeId` and `EdgeId` are dense
//! indices assigned by the topology store and never reused; the inner integer
//! is `pub` so callers can index side tables via `.index()`.
//!
//! `AgentId` and `TaskId` are opaque handles chosen by the orchestrator.

use std::fmt;

/// Reservation priority.  Higher values are stronger claims.
pub type Priority = i32;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Dense index of a stay point in the topology.
    pub struct NodeId(u32);
}

typed_id! {
    /// Dense index of a path segment.  A bidirectional edge has one id that
    /// appears in both endpoints' adjacency lists.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Identity of a mobile agent.
    pub struct AgentId(u32);
}

typed_id! {
    /// Key of a reservation, unique within the node or edge that holds it.
    pub struct TaskId(u64);
}
