//! Purchase transaction entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::plan::Plan;
use crate::domain::foundation::{DomainError, ErrorCode, SubjectId, TransactionId};

/// A credit purchase. Created when an order is requested and immutable
/// thereafter except for the paid flag, which transitions false -> true
/// exactly once at settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub subject_id: SubjectId,
    pub plan: Plan,
    pub credits: i64,
    pub amount: i64,
    pub paid: bool,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a pending transaction for a plan purchase. Credits and amount
    /// are snapshotted from the price table at creation time.
    pub fn new(subject_id: SubjectId, plan: Plan) -> Self {
        Self {
            id: TransactionId::new(),
            subject_id,
            plan,
            credits: plan.credits(),
            amount: plan.amount(),
            paid: false,
            created_at: Utc::now(),
        }
    }

    /// The receipt string embedded in the gateway order.
    pub fn receipt(&self) -> String {
        self.id.to_string()
    }

    /// Marks the transaction paid.
    ///
    /// Rejects a second settlement; this is the in-memory counterpart of the
    /// store's conditional update and keeps mocks honest about the invariant.
    pub fn settle(&mut self) -> Result<(), DomainError> {
        if self.paid {
            return Err(DomainError::new(
                ErrorCode::AlreadySettled,
                "Payment already processed",
            ));
        }
        self.paid = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject() -> SubjectId {
        SubjectId::new("user_2abc").unwrap()
    }

    #[test]
    fn new_transaction_snapshots_price_table() {
        let tx = Transaction::new(subject(), Plan::Advanced);
        assert_eq!(tx.plan, Plan::Advanced);
        assert_eq!(tx.credits, 500);
        assert_eq!(tx.amount, 50);
        assert!(!tx.paid);
    }

    #[test]
    fn receipt_is_the_transaction_id() {
        let tx = Transaction::new(subject(), Plan::Basic);
        assert_eq!(tx.receipt(), tx.id.to_string());
    }

    #[test]
    fn settle_flips_paid_once() {
        let mut tx = Transaction::new(subject(), Plan::Basic);
        tx.settle().unwrap();
        assert!(tx.paid);

        let err = tx.settle().unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadySettled);
        assert!(tx.paid, "second settle must not reverse the flag");
    }
}
