//! Store identifier tokens and their validator.
//!
//! Every entity in the graph is keyed by a fixed-length hexadecimal token.
//! Externally supplied identifiers are parsed through [`EntityId::parse`]
//! before any lookup is attempted, so malformed tokens never reach the store.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Length in characters of a well-formed identifier token.
pub const TOKEN_LEN: usize = 32;

/// Raised when an externally supplied identifier does not conform to the
/// store's token shape. No store access happens after this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be {TOKEN_LEN} hexadecimal characters")]
pub struct MalformedIdentifier;

/// Fixed-length hexadecimal identifier assigned to Persons and Posts by the
/// store, and to Reactions by the reaction manager.
///
/// The canonical form is 32 lowercase hex digits. Parsing accepts mixed case
/// but rejects hyphens, wrong lengths, and non-hex characters. Identifiers
/// are immutable once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validate an externally supplied token and convert it to an identifier.
    pub fn parse(token: &str) -> Result<Self, MalformedIdentifier> {
        if token.len() != TOKEN_LEN || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(MalformedIdentifier);
        }
        Uuid::try_parse(token)
            .map(Self)
            .map_err(|_| MalformedIdentifier)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.as_simple())
    }
}

impl FromStr for EntityId {
    type Err = MalformedIdentifier;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::parse(token)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Self::parse(&token).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn generated_identifiers_round_trip_through_display() {
        let id = EntityId::generate();
        let token = id.to_string();
        assert_eq!(token.len(), TOKEN_LEN);
        assert_eq!(EntityId::parse(&token), Ok(id));
    }

    #[test]
    fn parsing_is_case_insensitive_but_canonicalises_to_lowercase() {
        let id = EntityId::generate();
        let upper = id.to_string().to_uppercase();
        let parsed = EntityId::parse(&upper).expect("uppercase token parses");
        assert_eq!(parsed, id);
        assert_eq!(parsed.to_string(), id.to_string());
    }

    #[rstest]
    #[case("")]
    #[case("abc123")]
    #[case("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz")]
    #[case("3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    #[case("00112233445566778899aabbccddeeff0")]
    fn malformed_tokens_are_rejected(#[case] token: &str) {
        assert_eq!(EntityId::parse(token), Err(MalformedIdentifier));
    }

    #[test]
    fn serde_uses_the_token_form() {
        let id = EntityId::generate();
        let encoded = serde_json::to_string(&id).expect("serialise id");
        assert_eq!(encoded, format!("\"{id}\""));
        let decoded: EntityId = serde_json::from_str(&encoded).expect("deserialise id");
        assert_eq!(decoded, id);
    }
}
