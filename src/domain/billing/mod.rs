//! Billing module - Subscriptions and payment reconciliation rules.

mod subscription;
mod tx_ref;
mod webhook_event;
mod webhook_verifier;
mod errors;

pub use subscription::{BillingCycle, Subscription, SubscriptionStatus};
pub use tx_ref::TxRef;
pub use webhook_event::{
    WebhookCustomer, WebhookData, WebhookEnvelope, WebhookKind, WebhookMeta,
};
pub use webhook_verifier::{compute_test_signature, PaymentWebhookVerifier, WebhookError};
pub use errors::BillingError;
