//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, SubjectId};
use crate::domain::identity::{User, UserFields};
use crate::ports::UserRepository;

/// PostgreSQL implementation of the UserRepository port.
///
/// The `users` table has a unique constraint on `subject_id`; upserts target
/// it so replayed provider events converge on one row.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    subject_id: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    photo_url: Option<String>,
    credit_balance: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            subject_id: SubjectId::new(row.subject_id)
                .map_err(|e| DomainError::database(format!("Invalid subject_id: {}", e)))?,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            photo_url: row.photo_url,
            credit_balance: row.credit_balance,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_subject(&self, subject: &SubjectId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT subject_id, email, first_name, last_name, photo_url,
                   credit_balance, created_at, updated_at
            FROM users
            WHERE subject_id = $1
            "#,
        )
        .bind(subject.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find user: {}", e)))?;

        row.map(User::try_from).transpose()
    }

    async fn upsert(&self, user: &User) -> Result<(), DomainError> {
        // The conflict arm touches provider-owned fields only; an existing
        // row keeps its credit_balance and created_at
        sqlx::query(
            r#"
            INSERT INTO users (
                subject_id, email, first_name, last_name, photo_url,
                credit_balance, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (subject_id) DO UPDATE SET
                email = EXCLUDED.email,
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                photo_url = EXCLUDED.photo_url,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user.subject_id.as_str())
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.photo_url)
        .bind(user.credit_balance)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to upsert user: {}", e)))?;

        Ok(())
    }

    async fn update_fields(
        &self,
        subject: &SubjectId,
        fields: &UserFields,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                first_name = $3,
                last_name = $4,
                photo_url = $5,
                updated_at = now()
            WHERE subject_id = $1
            "#,
        )
        .bind(subject.as_str())
        .bind(&fields.email)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.photo_url)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, subject: &SubjectId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE subject_id = $1")
            .bind(subject.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete user: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn credit_balance(&self, subject: &SubjectId) -> Result<Option<i64>, DomainError> {
        let balance: Option<i64> =
            sqlx::query_scalar("SELECT credit_balance FROM users WHERE subject_id = $1")
                .bind(subject.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to read balance: {}", e)))?;

        Ok(balance)
    }
}
