//! Billing handlers: balances, order creation, payment verification and
//! settlement.

mod create_order;
mod get_credits;
mod settle_payment;
mod verify_payment;

pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use get_credits::{GetCreditsHandler, GetCreditsQuery, GetCreditsResult};
pub use settle_payment::{SettlePaymentCommand, SettlePaymentHandler, SettlePaymentResult};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler};
