//! Payment provider webhook payload types.

use serde::Deserialize;

/// Event families the reconciliation handler dispatches on.
///
/// Anything else is acknowledged and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookKind {
    ChargeCompleted,
    SubscriptionActivated,
    SubscriptionUpdated,
    Unknown,
}

/// Parsed webhook envelope, after signature verification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebhookEnvelope {
    pub event: String,
    #[serde(default)]
    pub data: WebhookData,
}

impl WebhookEnvelope {
    pub fn kind(&self) -> WebhookKind {
        match self.event.as_str() {
            "charge.completed" => WebhookKind::ChargeCompleted,
            "subscription.activated" => WebhookKind::SubscriptionActivated,
            "subscription.updated" => WebhookKind::SubscriptionUpdated,
            _ => WebhookKind::Unknown,
        }
    }
}

/// Transaction data carried by the webhook.
///
/// Every field is optional on the wire; the handler validates what each
/// event kind actually needs.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WebhookData {
    pub tx_ref: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub customer: Option<WebhookCustomer>,
    #[serde(default)]
    pub meta: Option<WebhookMeta>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WebhookCustomer {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WebhookMeta {
    pub user_id: Option<String>,
    pub billing_cycle: Option<String>,
}
