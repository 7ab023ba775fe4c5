//! Strongly typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::errors::{DomainError, ErrorCode};

/// Identity-provider subject id: the unique, immutable key of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Creates a subject id, rejecting empty values.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::new(
                ErrorCode::ValidationFailed,
                "Subject id cannot be empty",
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transaction identifier. Doubles as the reconciliation receipt embedded
/// in gateway orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Generates a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parses a receipt string back into a transaction id.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Uuid::parse_str(value).map(Self).map_err(|_| {
            DomainError::new(
                ErrorCode::TransactionNotFound,
                format!("Receipt is not a valid transaction id: {}", value),
            )
        })
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_id_rejects_empty() {
        assert!(SubjectId::new("").is_err());
        assert!(SubjectId::new("   ").is_err());
        assert!(SubjectId::new("user_2abc").is_ok());
    }

    #[test]
    fn transaction_id_round_trips_through_receipt() {
        let id = TransactionId::new();
        let parsed = TransactionId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn transaction_id_parse_rejects_garbage() {
        let err = TransactionId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err.code, ErrorCode::TransactionNotFound);
    }
}
