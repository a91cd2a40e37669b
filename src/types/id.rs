//! Typed ID wrappers for compile-time type safety.
//!
//! The store assigns integer identities; these newtypes keep a `MovieId` from
//! being handed to a query that expects a `TheatreId`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate typed ID wrappers with common trait implementations.
macro_rules! typed_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            sqlx::Type,
        )]
        #[sqlx(transparent)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw store-assigned identity.
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw integer value.
            pub fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(UserId, "Identifies a user account.");
typed_id!(CinemaId, "Identifies a cinema.");
typed_id!(TheatreId, "Identifies a theatre within a cinema.");
typed_id!(SeatSlotId, "Identifies one persisted seat slot.");
typed_id!(MovieId, "Identifies a movie.");
typed_id!(ActorId, "Identifies an actor.");
typed_id!(SessionId, "Identifies a scheduled session.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_ids_round_trip_through_i64() {
        let id = MovieId::new(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(i64::from(id), 42);
        assert_eq!(MovieId::from(42), id);
    }

    #[test]
    fn typed_ids_serialize_as_bare_integers() {
        let id = SessionId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: SessionId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn typed_ids_display_the_raw_value() {
        assert_eq!(TheatreId::new(3).to_string(), "3");
    }
}
