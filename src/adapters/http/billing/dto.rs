//! HTTP DTOs for billing endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::billing::InitializePaymentResult;
use crate::domain::billing::{BillingCycle, Subscription};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to start a hosted checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializePaymentRequest {
    /// Amount in the major currency unit.
    pub amount: i64,
    /// The subscription term being purchased.
    pub billing_cycle: BillingCycle,
    /// Optional ISO currency code, defaults server-side.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Request to reconcile a payment by its transaction reference.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    pub tx_ref: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for checkout initiation.
#[derive(Debug, Clone, Serialize)]
pub struct InitializePaymentResponse {
    pub success: bool,
    /// Hosted checkout URL to redirect the customer to.
    pub payment_url: String,
    /// Reference the client hands back for verification.
    pub tx_ref: String,
}

impl From<InitializePaymentResult> for InitializePaymentResponse {
    fn from(result: InitializePaymentResult) -> Self {
        Self {
            success: true,
            payment_url: result.payment_url,
            tx_ref: result.tx_ref.as_str().to_string(),
        }
    }
}

/// Subscription view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub id: String,
    pub user_id: String,
    pub tx_ref: String,
    pub amount: i64,
    pub currency: String,
    pub billing_cycle: BillingCycle,
    pub status: String,
    pub provider: String,
    pub created_at: String,
    pub expires_at: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(subscription: Subscription) -> Self {
        Self {
            id: subscription.id.to_string(),
            user_id: subscription.user_id.to_string(),
            tx_ref: subscription.tx_ref.as_str().to_string(),
            amount: subscription.amount,
            currency: subscription.currency,
            billing_cycle: subscription.billing_cycle,
            status: subscription.status.as_str().to_string(),
            provider: subscription.provider,
            created_at: subscription.created_at.as_datetime().to_rfc3339(),
            expires_at: subscription.expires_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for a successful verification.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub subscription: SubscriptionResponse,
}
