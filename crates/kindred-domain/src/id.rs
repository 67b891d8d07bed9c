//! Identifiers for people and relationships
//!
//! Both identifiers wrap a UUIDv7, which gives:
//! - Chronological sortability (insertion order survives a round trip through storage)
//! - 128-bit uniqueness without coordination
//! - The canonical hyphenated string form for display and parsing

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a new UUIDv7-based identifier
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Create an identifier from a raw u128 value
            ///
            /// This is primarily for storage layer deserialization and tests.
            pub fn from_value(value: u128) -> Self {
                Self(Uuid::from_u128(value))
            }

            /// Parse an identifier from its UUID string form
            pub fn from_string(s: &str) -> Result<Self, String> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| format!("Invalid {} id: {}", $label, e))
            }

            /// Get the raw u128 value
            pub fn value(&self) -> u128 {
                self.0.as_u128()
            }

            /// First eight hex digits, handy for tables and log lines
            pub fn short(&self) -> String {
                self.to_string()[..8].to_string()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_string(s)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a person
    PersonId,
    "person"
);

entity_id!(
    /// Unique identifier for a relationship
    RelationshipId,
    "relationship"
);


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: ordering matches the underlying u128 ordering
        #[test]
        fn test_ordering_property(a: u128, b: u128) {
            let id_a = PersonId::from_value(a);
            let id_b = PersonId::from_value(b);

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }

        /// Property: the string form parses back to the same id
        #[test]
        fn test_string_roundtrip(value: u128) {
            let id = PersonId::from_value(value);
            prop_assert_eq!(PersonId::from_string(&id.to_string()).unwrap(), id);
        }
    }
}
