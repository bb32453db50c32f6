//! Node and edge identifiers of the walk network.
//!
//! Both are dense `u32` indices assigned by the network builder, so
//! `id.index()` addresses the network's per-node and per-edge arrays
//! directly.  `u32::MAX` is reserved as [`NodeId::INVALID`] /
//! [`EdgeId::INVALID`] for "unset" slots in routing and clipping tables.

use std::fmt;

macro_rules! graph_id {
    ($(#[$attr:meta])* $name:ident, $prefix:literal) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            pub const INVALID: $name = $name(u32::MAX);

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// The id at position `index`, or `None` if it does not fit
            /// below the sentinel.
            pub fn from_index(index: usize) -> Option<$name> {
                u32::try_from(index).ok().filter(|&i| i != u32::MAX).map($name)
            }
        }

        /// Unset slots start out invalid.
        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        /// `n42` / `e7`; invalid ids print as `n?` / `e?`.
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($prefix, "{}"), self.0)
                } else {
                    f.write_str(concat!($prefix, "?"))
                }
            }
        }
    };
}

graph_id! {
    /// A walk-network node (street intersection or way vertex).
    NodeId, "n"
}

graph_id! {
    /// A directed walk-network edge, numbered in CSR order.
    EdgeId, "e"
}
