//! Object identifiers.
//!
//! Every cross-entity reference in Landgrid is an [`ObjectId`]: an opaque
//! 24-character lowercase hexadecimal string. Malformed identifiers are a
//! validation-level failure; the store never sees one.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of the hexadecimal form of an identifier.
pub const OBJECT_ID_LEN: usize = 24;

/// Error produced when parsing an [`ObjectId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid object id '{raw}': expected {OBJECT_ID_LEN} hexadecimal characters")]
pub struct IdError {
    /// The rejected input.
    pub raw: String,
}

/// Opaque identifier for an entity record.
///
/// Always exactly 24 lowercase hexadecimal characters. Uppercase input is
/// accepted and folded to lowercase, so two spellings of the same id compare
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Parses an identifier, folding case.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        let trimmed = raw.trim();
        if trimmed.len() == OBJECT_ID_LEN && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(trimmed.to_ascii_lowercase()))
        } else {
            Err(IdError {
                raw: raw.to_string(),
            })
        }
    }

    /// Generates a fresh random identifier (12 random bytes, hex encoded).
    pub fn generate() -> Self {
        let bytes: [u8; OBJECT_ID_LEN / 2] = rand::random();
        Self(hex::encode(bytes))
    }

    /// Returns the hexadecimal form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ObjectId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_24_hex() {
        let id = ObjectId::parse("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(id.as_str(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn test_parse_folds_case() {
        let upper = ObjectId::parse("507F1F77BCF86CD799439011").unwrap();
        let lower = ObjectId::parse("507f1f77bcf86cd799439011").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert!(ObjectId::parse("507f1f77").is_err());
        assert!(ObjectId::parse("507f1f77bcf86cd79943901100").is_err());
        assert!(ObjectId::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_hex() {
        assert!(ObjectId::parse("507f1f77bcf86cd79943901z").is_err());
    }

    #[test]
    fn test_generate_is_valid_and_unique() {
        let a = ObjectId::generate();
        let b = ObjectId::generate();
        assert_eq!(a.as_str().len(), OBJECT_ID_LEN);
        assert!(ObjectId::parse(a.as_str()).is_ok());
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_round_trip() {
        let id = ObjectId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_deserialize_rejects_malformed() {
        let result: Result<ObjectId, _> = serde_json::from_str("\"not-an-id\"");
        assert!(result.is_err());
    }
}
