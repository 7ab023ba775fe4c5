//! Identity-provider lifecycle events.
//!
//! The provider delivers an envelope of the form `{ "type": ..., "data": ... }`.
//! Recognized kinds map to typed events; everything else is carried through as
//! `Unrecognized` so the handler can acknowledge without acting.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::foundation::{DomainError, ErrorCode, SubjectId};

/// Provider-owned user fields carried by created/updated events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
}

/// A parsed lifecycle event.
#[derive(Debug, Clone)]
pub enum IdentityEvent {
    Created {
        subject: SubjectId,
        fields: UserFields,
    },
    Updated {
        subject: SubjectId,
        fields: UserFields,
    },
    Deleted {
        subject: SubjectId,
    },
    /// Accepted but produces no state change.
    Unrecognized {
        kind: String,
    },
}

/// Raw webhook envelope.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    data: Value,
}

/// User payload as the provider serializes it.
#[derive(Debug, Deserialize)]
struct ProviderUserData {
    id: String,
    #[serde(default)]
    email_addresses: Vec<ProviderEmail>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderEmail {
    email_address: String,
}

/// Deleted payload carries only the subject id.
#[derive(Debug, Deserialize)]
struct ProviderDeletedData {
    id: String,
}

impl IdentityEvent {
    /// Parses a verified webhook body into a typed event.
    ///
    /// Unknown event kinds parse successfully as [`IdentityEvent::Unrecognized`];
    /// malformed payloads for known kinds are errors.
    pub fn parse(payload: &[u8]) -> Result<Self, DomainError> {
        let envelope: Envelope = serde_json::from_slice(payload).map_err(|e| {
            DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Invalid event envelope: {}", e),
            )
        })?;

        match envelope.kind.as_str() {
            "user.created" | "user.updated" => {
                let data: ProviderUserData =
                    serde_json::from_value(envelope.data).map_err(|e| {
                        DomainError::new(
                            ErrorCode::ValidationFailed,
                            format!("Invalid user payload: {}", e),
                        )
                    })?;

                let subject = SubjectId::new(data.id)?;
                let fields = UserFields {
                    email: data
                        .email_addresses
                        .into_iter()
                        .next()
                        .map(|e| e.email_address)
                        .unwrap_or_default(),
                    first_name: data.first_name,
                    last_name: data.last_name,
                    photo_url: data.image_url,
                };

                if envelope.kind == "user.created" {
                    Ok(IdentityEvent::Created { subject, fields })
                } else {
                    Ok(IdentityEvent::Updated { subject, fields })
                }
            }
            "user.deleted" => {
                let data: ProviderDeletedData =
                    serde_json::from_value(envelope.data).map_err(|e| {
                        DomainError::new(
                            ErrorCode::ValidationFailed,
                            format!("Invalid deleted payload: {}", e),
                        )
                    })?;
                Ok(IdentityEvent::Deleted {
                    subject: SubjectId::new(data.id)?,
                })
            }
            _ => Ok(IdentityEvent::Unrecognized {
                kind: envelope.kind,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user_created() {
        let payload = br#"{
            "type": "user.created",
            "data": {
                "id": "user_2abc",
                "email_addresses": [{"email_address": "ada@example.com"}],
                "first_name": "Ada",
                "last_name": "Lovelace",
                "image_url": "https://img.example.com/a.png"
            }
        }"#;

        match IdentityEvent::parse(payload).unwrap() {
            IdentityEvent::Created { subject, fields } => {
                assert_eq!(subject.as_str(), "user_2abc");
                assert_eq!(fields.email, "ada@example.com");
                assert_eq!(fields.first_name.as_deref(), Some("Ada"));
                assert_eq!(
                    fields.photo_url.as_deref(),
                    Some("https://img.example.com/a.png")
                );
            }
            other => panic!("Expected Created, got {:?}", other),
        }
    }

    #[test]
    fn parses_user_updated_without_optional_fields() {
        let payload = br#"{
            "type": "user.updated",
            "data": {
                "id": "user_2abc",
                "email_addresses": [{"email_address": "ada@example.com"}]
            }
        }"#;

        match IdentityEvent::parse(payload).unwrap() {
            IdentityEvent::Updated { fields, .. } => {
                assert_eq!(fields.first_name, None);
                assert_eq!(fields.photo_url, None);
            }
            other => panic!("Expected Updated, got {:?}", other),
        }
    }

    #[test]
    fn parses_user_deleted() {
        let payload = br#"{"type": "user.deleted", "data": {"id": "user_2abc", "deleted": true}}"#;

        match IdentityEvent::parse(payload).unwrap() {
            IdentityEvent::Deleted { subject } => assert_eq!(subject.as_str(), "user_2abc"),
            other => panic!("Expected Deleted, got {:?}", other),
        }
    }

    #[test]
    fn unknown_kind_is_unrecognized_not_error() {
        let payload = br#"{"type": "session.created", "data": {"id": "sess_1"}}"#;

        match IdentityEvent::parse(payload).unwrap() {
            IdentityEvent::Unrecognized { kind } => assert_eq!(kind, "session.created"),
            other => panic!("Expected Unrecognized, got {:?}", other),
        }
    }

    #[test]
    fn malformed_known_payload_is_error() {
        let payload = br#"{"type": "user.created", "data": {"no_id": true}}"#;
        assert!(IdentityEvent::parse(payload).is_err());
    }

    #[test]
    fn non_json_body_is_error() {
        assert!(IdentityEvent::parse(b"not json").is_err());
    }
}
