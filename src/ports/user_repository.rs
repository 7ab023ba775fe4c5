//! User repository port.
//!
//! Defines the contract for persisting user records synchronized from the
//! identity provider and for reading credit balances.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SubjectId};
use crate::domain::identity::{User, UserFields};

/// Repository port for synchronized user records.
///
/// The identity provider is the source of truth for profile fields, so the
/// write operations mirror its lifecycle events. Implementations must ensure
/// a unique constraint on the subject id.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by the provider-issued subject id.
    ///
    /// Returns `None` if no record exists.
    async fn find_by_subject(&self, subject: &SubjectId) -> Result<Option<User>, DomainError>;

    /// Insert a user, or overwrite the provider-owned fields if a record
    /// with the same subject id already exists.
    ///
    /// Replayed "created" events must converge on the same row rather than
    /// fail; the credit balance of an existing row is never touched.
    async fn upsert(&self, user: &User) -> Result<(), DomainError>;

    /// Overwrite the provider-owned fields of an existing user.
    ///
    /// Returns `false` when no record with that subject id exists; the
    /// caller decides whether that is an error.
    async fn update_fields(
        &self,
        subject: &SubjectId,
        fields: &UserFields,
    ) -> Result<bool, DomainError>;

    /// Delete the record for a subject id.
    ///
    /// Deleting a subject with no record is a no-op and returns `false`.
    async fn delete(&self, subject: &SubjectId) -> Result<bool, DomainError>;

    /// Read the credit balance for a subject.
    ///
    /// Returns `None` when no record exists; callers surface that as a
    /// zero balance.
    async fn credit_balance(&self, subject: &SubjectId) -> Result<Option<i64>, DomainError>;
}
