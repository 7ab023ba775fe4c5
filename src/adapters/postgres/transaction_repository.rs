//! PostgreSQL implementation of TransactionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::billing::{Plan, Transaction};
use crate::domain::foundation::{DomainError, ErrorCode, SubjectId, TransactionId};
use crate::ports::{SettlementOutcome, TransactionRepository};

/// PostgreSQL implementation of the TransactionRepository port.
///
/// Settlement runs in a single database transaction: a conditional update on
/// the paid flag claims the row, then the user's balance is incremented.
/// Concurrent settlements of the same id serialize on the row lock, so at
/// most one claim succeeds.
pub struct PostgresTransactionRepository {
    pool: PgPool,
}

impl PostgresTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a transaction.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    subject_id: String,
    plan: String,
    credits: i64,
    amount: i64,
    paid: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            id: TransactionId::from_uuid(row.id),
            subject_id: SubjectId::new(row.subject_id)
                .map_err(|e| DomainError::database(format!("Invalid subject_id: {}", e)))?,
            plan: parse_plan(&row.plan)?,
            credits: row.credits,
            amount: row.amount,
            paid: row.paid,
            created_at: row.created_at,
        })
    }
}

fn parse_plan(s: &str) -> Result<Plan, DomainError> {
    match s {
        "basic" => Ok(Plan::Basic),
        "advanced" => Ok(Plan::Advanced),
        "business" => Ok(Plan::Business),
        _ => Err(DomainError::database(format!("Invalid plan value: {}", s))),
    }
}

fn plan_to_string(plan: &Plan) -> &'static str {
    match plan {
        Plan::Basic => "basic",
        Plan::Advanced => "advanced",
        Plan::Business => "business",
    }
}

#[async_trait]
impl TransactionRepository for PostgresTransactionRepository {
    async fn create(&self, transaction: &Transaction) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO transactions (
                id, subject_id, plan, credits, amount, paid, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(transaction.id.as_uuid())
        .bind(transaction.subject_id.as_str())
        .bind(plan_to_string(&transaction.plan))
        .bind(transaction.credits)
        .bind(transaction.amount)
        .bind(transaction.paid)
        .bind(transaction.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save transaction: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &TransactionId,
    ) -> Result<Option<Transaction>, DomainError> {
        let row: Option<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, subject_id, plan, credits, amount, paid, created_at
            FROM transactions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find transaction: {}", e)))?;

        row.map(Transaction::try_from).transpose()
    }

    async fn settle(&self, id: &TransactionId) -> Result<SettlementOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to open transaction: {}", e)))?;

        // The conditional update is the claim: zero rows means either the
        // id is unknown or someone settled first
        let claimed: Option<(String, i64)> = sqlx::query_as(
            r#"
            UPDATE transactions
            SET paid = true
            WHERE id = $1 AND paid = false
            RETURNING subject_id, credits
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to claim transaction: {}", e)))?;

        let Some((subject_id, credits)) = claimed else {
            tx.rollback()
                .await
                .map_err(|e| DomainError::database(format!("Failed to rollback: {}", e)))?;

            let exists: Option<bool> =
                sqlx::query_scalar("SELECT paid FROM transactions WHERE id = $1")
                    .bind(id.as_uuid())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(|e| {
                        DomainError::database(format!("Failed to find transaction: {}", e))
                    })?;

            return match exists {
                Some(_) => Ok(SettlementOutcome::AlreadySettled),
                None => Err(DomainError::new(
                    ErrorCode::TransactionNotFound,
                    "Transaction not found",
                )),
            };
        };

        let credited = sqlx::query(
            r#"
            UPDATE users
            SET credit_balance = credit_balance + $2, updated_at = now()
            WHERE subject_id = $1
            "#,
        )
        .bind(&subject_id)
        .bind(credits)
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to credit user: {}", e)))?;

        if credited.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| DomainError::database(format!("Failed to rollback: {}", e)))?;
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                "User for transaction no longer exists",
            ));
        }

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit settlement: {}", e)))?;

        Ok(SettlementOutcome::Settled { credits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_encoding_round_trips() {
        for plan in Plan::ALL {
            assert_eq!(parse_plan(plan_to_string(&plan)).unwrap(), plan);
        }
    }

    #[test]
    fn unknown_plan_value_is_database_error() {
        let err = parse_plan("enterprise").unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
