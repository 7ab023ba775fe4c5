//! Razorpay adapter implementing the `PaymentGateway` port.

mod gateway;

pub use gateway::{RazorpayConfig, RazorpayGateway};
