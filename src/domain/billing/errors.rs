//! Billing domain errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

use super::webhook_verifier::WebhookError;

/// Errors from the payment reconciliation operations.
#[derive(Debug, Clone, Error)]
pub enum BillingError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("An active monthly subscription already exists")]
    DuplicateMonthlySubscription,

    #[error("Payment initialization failed: {reason}")]
    InitializationFailed { reason: String },

    #[error("Payment verification failed: {reason}")]
    VerificationFailed { reason: String },

    #[error("Payment not yet confirmed by the provider")]
    VerificationPending,

    #[error(transparent)]
    Webhook(#[from] WebhookError),

    #[error("Store error: {0}")]
    Store(DomainError),
}

impl BillingError {
    pub fn initialization_failed(reason: impl Into<String>) -> Self {
        BillingError::InitializationFailed { reason: reason.into() }
    }

    pub fn verification_failed(reason: impl Into<String>) -> Self {
        BillingError::VerificationFailed { reason: reason.into() }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BillingError::Validation(_) => ErrorCode::ValidationFailed,
            BillingError::DuplicateMonthlySubscription => ErrorCode::DuplicateMonthlySubscription,
            BillingError::InitializationFailed { .. } => ErrorCode::PaymentInitFailed,
            BillingError::VerificationFailed { .. } => ErrorCode::VerificationFailed,
            BillingError::VerificationPending => ErrorCode::VerificationPending,
            BillingError::Webhook(_) => ErrorCode::InvalidWebhookSignature,
            BillingError::Store(_) => ErrorCode::DatabaseError,
        }
    }

    /// User-facing message. Store and provider internals are not leaked.
    pub fn message(&self) -> String {
        match self {
            BillingError::Validation(e) => e.to_string(),
            BillingError::DuplicateMonthlySubscription => {
                "You already have an active monthly subscription".to_string()
            }
            BillingError::InitializationFailed { .. } => {
                "Failed to initialize payment".to_string()
            }
            BillingError::VerificationFailed { .. } => {
                "Payment verification failed".to_string()
            }
            BillingError::VerificationPending => {
                "Payment is still being processed".to_string()
            }
            BillingError::Webhook(e) => e.to_string(),
            BillingError::Store(_) => "Internal server error".to_string(),
        }
    }
}

impl From<DomainError> for BillingError {
    fn from(err: DomainError) -> Self {
        BillingError::Store(err)
    }
}
