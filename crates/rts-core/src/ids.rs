//! Typed identifiers for agents, armies and obstacles.
//!
//! Each id is a `Copy + Ord + Hash` newtype over a small integer, so ids of
//! different kinds cannot be mixed up and can key maps or sorted `Vec`s
//! directly.  The maximum integer is reserved as the `INVALID` sentinel.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }
        }

        /// Defaults to `INVALID`, so an id nobody assigned stands out in logs.
        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!($tag, "#{}"), self.0)
                } else {
                    f.write_str(concat!($tag, "#invalid"))
                }
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
    /// A steerable agent (vehicle).  Also its update order within a tick.
    pub struct AgentId(u32) => "agent";
}

typed_id! {
    /// Side an agent fights for.  Agents of different armies are enemies.
    pub struct ArmyId(u16) => "army";
}

typed_id! {
    /// A static obstacle known to the radar.
    pub struct ObstacleId(u32) => "obstacle";
}
