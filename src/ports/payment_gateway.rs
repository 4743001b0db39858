//! Payment gateway port.
//!
//! Abstracts the hosted-checkout provider (Flutterwave in production) so
//! handlers and tests never talk HTTP directly.

use crate::domain::billing::{BillingCycle, TxRef};
use crate::domain::foundation::UserId;
use async_trait::async_trait;
use std::error::Error;
use std::fmt;

/// Request to open a hosted checkout session.
#[derive(Debug, Clone)]
pub struct HostedSessionRequest {
    pub tx_ref: TxRef,
    pub amount: i64,
    pub currency: String,
    pub redirect_url: String,
    pub customer_email: String,
    pub customer_name: Option<String>,
    /// Echoed back through verification and webhooks as metadata.
    pub user_id: UserId,
    pub billing_cycle: BillingCycle,
}

/// A created checkout session the user is redirected to.
#[derive(Debug, Clone)]
pub struct HostedSession {
    pub payment_url: String,
}

/// Result of verify-by-reference.
///
/// `Pending` means the provider answered but the transaction is not
/// confirmed successful yet; callers may retry. Transport and protocol
/// failures surface as `GatewayError` instead.
#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    Confirmed(ConfirmedPayment),
    Pending,
}

/// Transaction details for a confirmed payment.
#[derive(Debug, Clone)]
pub struct ConfirmedPayment {
    pub tx_ref: TxRef,
    pub amount: i64,
    pub currency: String,
    pub billing_cycle: Option<BillingCycle>,
    pub user_id: Option<String>,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
}

/// Error from the payment gateway.
#[derive(Debug, Clone)]
pub struct GatewayError {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Whether retrying may succeed (network errors, 5xx).
    pub retryable: bool,
}

impl GatewayError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            retryable: false,
        }
    }

    pub fn retryable(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            retryable: true,
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for GatewayError {}

/// Port for the hosted payment provider.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Provider name stored on subscription records.
    fn provider_name(&self) -> &'static str;

    /// Open a hosted checkout session for the given payment attempt.
    async fn create_hosted_session(
        &self,
        request: &HostedSessionRequest,
    ) -> Result<HostedSession, GatewayError>;

    /// Look up a transaction by its reference.
    async fn verify_by_reference(&self, tx_ref: &TxRef) -> Result<VerifyOutcome, GatewayError>;
}
