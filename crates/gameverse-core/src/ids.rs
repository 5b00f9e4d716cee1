//! Identifier types for GameVerse.
//!
//! This module provides strongly-typed identifiers for players, games,
//! licenses, and reviews.
//!
//! # Macro-based ID Types
//!
//! The `uuid_id_type!` macro reduces boilerplate for UUID-based identifier
//! types, ensuring consistent implementation of serialization, parsing, and
//! display traits. Licenses and reviews use ULIDs instead so their keys sort
//! chronologically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Macro to define a UUID-based identifier type with standard trait implementations.
///
/// This macro generates a newtype wrapper around `uuid::Uuid` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`
/// - `Serialize`, `Deserialize` (as string)
/// - `FromStr`, `Display`, `Debug`
/// - `TryFrom<String>`, `Into<String>`
/// - `AsRef<[u8]>`
macro_rules! uuid_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Create a new identifier from a UUID.
            #[must_use]
            pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a new random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Return the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }

            /// Return the bytes of the UUID (16 bytes).
            #[must_use]
            pub fn as_bytes(&self) -> &[u8; 16] {
                self.0.as_bytes()
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid = uuid::Uuid::parse_str(s).map_err(|_| IdError::InvalidUuid)?;
                Ok(Self(uuid))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                self.0.as_bytes()
            }
        }
    };
}

/// Macro to define a ULID-based identifier type.
///
/// ULIDs are time-ordered, so records keyed by these identifiers sort
/// chronologically in the store without a separate timestamp index.
macro_rules! ulid_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Ulid);

        impl $name {
            /// Create a new identifier from a ULID.
            #[must_use]
            pub const fn from_ulid(ulid: Ulid) -> Self {
                Self(ulid)
            }

            /// Generate a new identifier with the current timestamp.
            #[must_use]
            pub fn generate() -> Self {
                Self(Ulid::new())
            }

            /// Return the underlying ULID.
            #[must_use]
            pub const fn as_ulid(&self) -> &Ulid {
                &self.0
            }

            /// Return the bytes of the ULID (16 bytes).
            #[must_use]
            pub fn to_bytes(&self) -> [u8; 16] {
                self.0.to_bytes()
            }

            /// Create an identifier from bytes.
            ///
            /// # Errors
            ///
            /// Returns an error if the bytes are invalid.
            pub fn from_bytes(bytes: [u8; 16]) -> Result<Self, IdError> {
                Ok(Self(Ulid::from_bytes(bytes)))
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let ulid = Ulid::from_string(s).map_err(|_| IdError::InvalidUlid)?;
                Ok(Self(ulid))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }
    };
}

// Define UUID-based identifier types using the macro
uuid_id_type!(
    PlayerId,
    "A player identifier (UUID format).\n\nPlayer IDs are minted at registration and carried in JWT `sub` claims."
);
uuid_id_type!(GameId, "A game catalog entry identifier (UUID format).");

// Define ULID-based identifier types using the macro
ulid_id_type!(
    LicenseId,
    "A license identifier (ULID for time-ordering).\n\nLicense IDs sort by purchase time, which keeps ownership scans chronological."
);
ulid_id_type!(ReviewId, "A review identifier (ULID for time-ordering).");

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a valid UUID.
    #[error("invalid UUID format")]
    InvalidUuid,

    /// The input is not a valid ULID.
    #[error("invalid ULID format")]
    InvalidUlid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_id_roundtrip() {
        let id = PlayerId::generate();
        let str_repr = id.to_string();
        let parsed = PlayerId::from_str(&str_repr).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn player_id_serde_json() {
        let id = PlayerId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn game_id_rejects_garbage() {
        assert_eq!(GameId::from_str("not-a-uuid"), Err(IdError::InvalidUuid));
    }

    #[test]
    fn license_id_roundtrip() {
        let id = LicenseId::generate();
        let str_repr = id.to_string();
        let parsed = LicenseId::from_str(&str_repr).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn license_id_bytes_roundtrip() {
        let id = LicenseId::generate();
        let bytes = id.to_bytes();
        let parsed = LicenseId::from_bytes(bytes).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn review_id_serde_json() {
        let id = ReviewId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ReviewId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
