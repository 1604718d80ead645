//! List and todo identifier types.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Get the raw u64 value.
            pub fn as_u64(&self) -> u64 {
                self.0
            }

            /// Create an ID from a raw u64 value.
            pub fn from_raw(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Identifier of a list, unique within one session.
    ///
    /// Assigned ids start at 1, so the default value `0` never matches a list.
    ListId
);

define_id!(
    /// Identifier of a todo, unique within its parent list.
    TodoId
);

/// Compute the next id to hand out.
///
/// The result is one greater than both the largest id still present and
/// the largest id ever issued (`high_water`), so ids freed by a deletion
/// are never handed out again.
pub(crate) fn next_id(existing: impl Iterator<Item = u64>, high_water: u64) -> u64 {
    existing.fold(high_water, u64::max) + 1
}
