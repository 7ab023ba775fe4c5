//! Local user record, synchronized from identity-provider webhooks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::UserFields;
use crate::domain::foundation::SubjectId;

/// A user mirrored from the identity provider.
///
/// Display and contact fields are owned by the provider and overwritten
/// wholesale on update events; only the credit balance is owned locally,
/// and only the settlement flow mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub subject_id: SubjectId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub photo_url: Option<String>,
    pub credit_balance: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a user from a provider "created" event. Balance starts at zero.
    pub fn from_provider(subject_id: SubjectId, fields: UserFields) -> Self {
        let now = Utc::now();
        Self {
            subject_id,
            email: fields.email,
            first_name: fields.first_name,
            last_name: fields.last_name,
            photo_url: fields.photo_url,
            credit_balance: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites provider-owned fields wholesale. The balance is untouched.
    pub fn apply_provider_fields(&mut self, fields: UserFields) {
        self.email = fields.email;
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.photo_url = fields.photo_url;
        self.updated_at = Utc::now();
    }
}
