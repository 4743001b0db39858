//! Billing handlers.

mod initialize_payment;
mod verify_payment;
mod poll_verification;
mod handle_payment_webhook;

pub use initialize_payment::{
    InitializePaymentCommand, InitializePaymentHandler, InitializePaymentResult,
};
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};
pub use poll_verification::{PollConfig, PollOutcome, VerificationPoller};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookDisposition,
};
