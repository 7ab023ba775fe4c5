//! SettlePaymentHandler - Command handler for crediting a verified payment.

use std::sync::Arc;

use super::verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler};
use crate::domain::foundation::{DomainError, ErrorCode, TransactionId};
use crate::ports::{PaymentGateway, SettlementOutcome, TransactionRepository};

/// Command to settle a completed checkout.
#[derive(Debug, Clone)]
pub struct SettlePaymentCommand {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Result of a successful settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlePaymentResult {
    pub transaction_id: TransactionId,
    /// Credits added to the caller's balance by this settlement.
    pub credits: i64,
}

/// Handler for payment settlement.
///
/// Trusts nothing from the client: the callback signature is re-verified,
/// the order is re-fetched from the gateway, and only a gateway-confirmed
/// paid order settles. Settlement itself is delegated to the store's atomic
/// claim, so a replayed callback surfaces as `AlreadySettled` instead of a
/// second credit.
pub struct SettlePaymentHandler {
    verifier: VerifyPaymentHandler,
    gateway: Arc<dyn PaymentGateway>,
    transactions: Arc<dyn TransactionRepository>,
}

impl SettlePaymentHandler {
    pub fn new(
        verifier: VerifyPaymentHandler,
        gateway: Arc<dyn PaymentGateway>,
        transactions: Arc<dyn TransactionRepository>,
    ) -> Self {
        Self {
            verifier,
            gateway,
            transactions,
        }
    }

    pub async fn handle(
        &self,
        cmd: SettlePaymentCommand,
    ) -> Result<SettlePaymentResult, DomainError> {
        // 1. Authenticate the callback
        self.verifier.handle(&VerifyPaymentCommand {
            order_id: cmd.order_id.clone(),
            payment_id: cmd.payment_id.clone(),
            signature: cmd.signature.clone(),
        })?;

        // 2. Re-fetch the order; the gateway is the authority on payment state
        let order = self.gateway.fetch_order(&cmd.order_id).await?;
        if !order.status.is_paid() {
            return Err(DomainError::new(ErrorCode::OrderNotPaid, "Payment failed"));
        }

        // 3. The receipt carries the local transaction id
        let receipt = order.receipt.as_deref().ok_or_else(|| {
            DomainError::new(
                ErrorCode::TransactionNotFound,
                "Order carries no receipt to reconcile against",
            )
        })?;
        let transaction_id = TransactionId::parse(receipt)?;

        // 4. Atomic claim-and-credit
        match self.transactions.settle(&transaction_id).await? {
            SettlementOutcome::Settled { credits } => {
                tracing::info!(
                    %transaction_id,
                    order_id = %cmd.order_id,
                    credits,
                    "Settled payment"
                );
                Ok(SettlePaymentResult {
                    transaction_id,
                    credits,
                })
            }
            SettlementOutcome::AlreadySettled => Err(DomainError::new(
                ErrorCode::AlreadySettled,
                "Payment already processed",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::{CheckoutSignatureVerifier, Plan, Transaction};
    use crate::domain::foundation::SubjectId;
    use crate::ports::{CreateOrderRequest, GatewayOrder, OrderStatus};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const SECRET: &str = "test_key_secret";

    // ════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════

    struct MockTransactionRepository {
        transactions: Mutex<HashMap<TransactionId, Transaction>>,
        credited: Mutex<i64>,
    }

    impl MockTransactionRepository {
        fn with_transaction(tx: Transaction) -> Self {
            let mut map = HashMap::new();
            map.insert(tx.id, tx);
            Self {
                transactions: Mutex::new(map),
                credited: Mutex::new(0),
            }
        }

        fn total_credited(&self) -> i64 {
            *self.credited.lock().unwrap()
        }
    }

    #[async_trait]
    impl TransactionRepository for MockTransactionRepository {
        async fn create(&self, transaction: &Transaction) -> Result<(), DomainError> {
            self.transactions
                .lock()
                .unwrap()
                .insert(transaction.id, transaction.clone());
            Ok(())
        }

        async fn find_by_id(
            &self,
            id: &TransactionId,
        ) -> Result<Option<Transaction>, DomainError> {
            Ok(self.transactions.lock().unwrap().get(id).cloned())
        }

        async fn settle(&self, id: &TransactionId) -> Result<SettlementOutcome, DomainError> {
            let mut transactions = self.transactions.lock().unwrap();
            let tx = transactions.get_mut(id).ok_or_else(|| {
                DomainError::new(ErrorCode::TransactionNotFound, "Transaction not found")
            })?;

            if tx.settle().is_err() {
                return Ok(SettlementOutcome::AlreadySettled);
            }
            *self.credited.lock().unwrap() += tx.credits;
            Ok(SettlementOutcome::Settled {
                credits: tx.credits,
            })
        }
    }

    struct MockPaymentGateway {
        orders: Mutex<HashMap<String, GatewayOrder>>,
    }

    impl MockPaymentGateway {
        fn with_order(order: GatewayOrder) -> Self {
            let mut map = HashMap::new();
            map.insert(order.id.clone(), order);
            Self {
                orders: Mutex::new(map),
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for MockPaymentGateway {
        async fn create_order(
            &self,
            _request: &CreateOrderRequest,
        ) -> Result<GatewayOrder, DomainError> {
            unreachable!("not exercised by settlement")
        }

        async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, DomainError> {
            self.orders
                .lock()
                .unwrap()
                .get(order_id)
                .cloned()
                .ok_or_else(|| {
                    DomainError::new(ErrorCode::TransactionNotFound, "Order not found")
                })
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Fixtures
    // ════════════════════════════════════════════════════════════════════════

    fn paid_order(id: &str, receipt: &str) -> GatewayOrder {
        GatewayOrder {
            id: id.to_string(),
            amount: 5000,
            currency: "INR".to_string(),
            receipt: Some(receipt.to_string()),
            status: OrderStatus::Paid,
        }
    }

    fn signed_command(order_id: &str, payment_id: &str) -> SettlePaymentCommand {
        SettlePaymentCommand {
            order_id: order_id.to_string(),
            payment_id: payment_id.to_string(),
            signature: CheckoutSignatureVerifier::new(SECRET).compute(order_id, payment_id),
        }
    }

    fn handler(
        gateway: Arc<MockPaymentGateway>,
        transactions: Arc<MockTransactionRepository>,
    ) -> SettlePaymentHandler {
        SettlePaymentHandler::new(
            VerifyPaymentHandler::new(CheckoutSignatureVerifier::new(SECRET)),
            gateway,
            transactions,
        )
    }

    // ════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn settles_verified_paid_order() {
        let tx = Transaction::new(SubjectId::new("user_2abc").unwrap(), Plan::Advanced);
        let transactions = Arc::new(MockTransactionRepository::with_transaction(tx.clone()));
        let gateway = Arc::new(MockPaymentGateway::with_order(paid_order(
            "order_123",
            &tx.receipt(),
        )));

        let result = handler(gateway, transactions.clone())
            .handle(signed_command("order_123", "pay_456"))
            .await
            .unwrap();

        assert_eq!(result.transaction_id, tx.id);
        assert_eq!(result.credits, 500);
        assert_eq!(transactions.total_credited(), 500);
    }

    #[tokio::test]
    async fn replayed_callback_credits_once() {
        let tx = Transaction::new(SubjectId::new("user_2abc").unwrap(), Plan::Business);
        let transactions = Arc::new(MockTransactionRepository::with_transaction(tx.clone()));
        let gateway = Arc::new(MockPaymentGateway::with_order(paid_order(
            "order_123",
            &tx.receipt(),
        )));
        let handler = handler(gateway, transactions.clone());

        handler
            .handle(signed_command("order_123", "pay_456"))
            .await
            .unwrap();

        let err = handler
            .handle(signed_command("order_123", "pay_456"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::AlreadySettled);
        assert!(err.code.is_soft_failure());
        assert_eq!(transactions.total_credited(), 5000, "credited exactly once");
    }

    #[tokio::test]
    async fn forged_signature_never_reaches_gateway() {
        let tx = Transaction::new(SubjectId::new("user_2abc").unwrap(), Plan::Basic);
        let transactions = Arc::new(MockTransactionRepository::with_transaction(tx.clone()));
        let gateway = Arc::new(MockPaymentGateway::with_order(paid_order(
            "order_123",
            &tx.receipt(),
        )));

        let mut cmd = signed_command("order_123", "pay_456");
        cmd.signature = "f".repeat(64);

        let err = handler(gateway, transactions.clone())
            .handle(cmd)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidSignature);
        assert_eq!(transactions.total_credited(), 0);
    }

    #[tokio::test]
    async fn unpaid_order_is_soft_failure() {
        let tx = Transaction::new(SubjectId::new("user_2abc").unwrap(), Plan::Basic);
        let transactions = Arc::new(MockTransactionRepository::with_transaction(tx.clone()));
        let mut order = paid_order("order_123", &tx.receipt());
        order.status = OrderStatus::Attempted;
        let gateway = Arc::new(MockPaymentGateway::with_order(order));

        let err = handler(gateway, transactions.clone())
            .handle(signed_command("order_123", "pay_456"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::OrderNotPaid);
        assert!(err.code.is_soft_failure());
        assert_eq!(transactions.total_credited(), 0);
    }

    #[tokio::test]
    async fn order_without_receipt_cannot_settle() {
        let tx = Transaction::new(SubjectId::new("user_2abc").unwrap(), Plan::Basic);
        let transactions = Arc::new(MockTransactionRepository::with_transaction(tx));
        let mut order = paid_order("order_123", "ignored");
        order.receipt = None;
        let gateway = Arc::new(MockPaymentGateway::with_order(order));

        let err = handler(gateway, transactions)
            .handle(signed_command("order_123", "pay_456"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::TransactionNotFound);
    }

    #[tokio::test]
    async fn unknown_transaction_in_receipt_fails() {
        let tx = Transaction::new(SubjectId::new("user_2abc").unwrap(), Plan::Basic);
        let transactions = Arc::new(MockTransactionRepository::with_transaction(tx));
        let stranger = TransactionId::new();
        let gateway = Arc::new(MockPaymentGateway::with_order(paid_order(
            "order_123",
            &stranger.to_string(),
        )));

        let err = handler(gateway, transactions)
            .handle(signed_command("order_123", "pay_456"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::TransactionNotFound);
    }
}
