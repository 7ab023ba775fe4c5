//! Transaction repository port.
//!
//! Defines the contract for persisting credit purchases and settling them
//! exactly once.

use async_trait::async_trait;

use crate::domain::billing::Transaction;
use crate::domain::foundation::{DomainError, TransactionId};

/// Result of a settlement attempt.
///
/// Settlement is idempotent at the store level: exactly one caller observes
/// `Settled` for a given transaction, every replay observes `AlreadySettled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// This call claimed the transaction and credited the user.
    Settled {
        /// Credits added to the user's balance.
        credits: i64,
    },
    /// The transaction was settled by an earlier call.
    AlreadySettled,
}

/// Repository port for credit purchase transactions.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Persist a new unpaid transaction.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, transaction: &Transaction) -> Result<(), DomainError>;

    /// Find a transaction by id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &TransactionId)
        -> Result<Option<Transaction>, DomainError>;

    /// Atomically mark a transaction paid and credit its user.
    ///
    /// Both mutations happen in a single database transaction. The paid
    /// flag acts as the claim: concurrent calls for the same id serialize
    /// on it, so at most one observes `Settled`.
    ///
    /// # Errors
    ///
    /// - `TransactionNotFound` if the id has no record
    /// - `DatabaseError` on persistence failure
    async fn settle(&self, id: &TransactionId) -> Result<SettlementOutcome, DomainError>;
}
