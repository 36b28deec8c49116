//! Typed entity identifiers.
//!
//! Every entity is keyed by a `u32` newtype. The value `0` means the row has
//! not been assigned a key yet; the store hands out keys starting at 1.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// The unassigned key.
            pub const UNASSIGNED: Self = Self(0);

            /// Returns `true` if no key has been assigned yet.
            pub fn is_unassigned(self) -> bool {
                self.0 == 0
            }

            /// Returns the raw numeric value.
            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u32>().map(Self)
            }
        }
    };
}

entity_id!(
    /// Genre key.
    GenreId
);
entity_id!(
    /// Artist key.
    ArtistId
);
entity_id!(
    /// Album key.
    AlbumId
);
entity_id!(
    /// Shopping cart line key.
    CartRecordId
);
entity_id!(
    /// Order key.
    OrderId
);
entity_id!(
    /// Order line key.
    OrderDetailId
);
