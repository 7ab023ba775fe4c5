//! CreateOrderHandler - Command handler for opening a credit purchase order.

use std::sync::Arc;

use crate::domain::billing::{Plan, Transaction};
use crate::domain::foundation::{DomainError, ErrorCode, SubjectId};
use crate::ports::{
    CreateOrderRequest, GatewayOrder, OrderNotes, PaymentGateway, TransactionRepository,
    UserRepository,
};

/// Command to purchase a credit bundle.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub subject: SubjectId,
    /// Client-supplied plan selector, e.g. `"Advanced"`.
    pub plan: String,
}

/// Result of a successful order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub transaction: Transaction,
    pub order: GatewayOrder,
}

/// Handler for opening a purchase order at the gateway.
///
/// A pending transaction is persisted before the gateway call so the order's
/// receipt can reference it; the transaction stays unpaid until the checkout
/// callback settles it.
pub struct CreateOrderHandler {
    users: Arc<dyn UserRepository>,
    transactions: Arc<dyn TransactionRepository>,
    gateway: Arc<dyn PaymentGateway>,
    currency: String,
}

impl CreateOrderHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        transactions: Arc<dyn TransactionRepository>,
        gateway: Arc<dyn PaymentGateway>,
        currency: String,
    ) -> Self {
        Self {
            users,
            transactions,
            gateway,
            currency,
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, DomainError> {
        // 1. Resolve the plan; unknown selectors fail before any writes
        let plan = Plan::from_selector(&cmd.plan)?;

        // 2. The caller must have a synchronized record to credit later
        if self.users.find_by_subject(&cmd.subject).await?.is_none() {
            return Err(DomainError::new(
                ErrorCode::UserNotFound,
                format!("No user record for subject {}", cmd.subject),
            ));
        }

        // 3. Persist the pending transaction
        let transaction = Transaction::new(cmd.subject.clone(), plan);
        self.transactions.create(&transaction).await?;

        // 4. Open the gateway order, carrying the transaction id as receipt
        let order = self
            .gateway
            .create_order(&CreateOrderRequest {
                amount: plan.amount_minor_units(),
                currency: self.currency.clone(),
                receipt: transaction.receipt(),
                notes: OrderNotes {
                    plan: plan.as_str().to_string(),
                    credits: plan.credits(),
                    subject_id: cmd.subject.to_string(),
                },
            })
            .await?;

        tracing::info!(
            transaction_id = %transaction.id,
            order_id = %order.id,
            plan = %plan,
            "Created purchase order"
        );

        Ok(CreateOrderResult { transaction, order })
    }
}
