//! HandlePaymentWebhookHandler - Reconciliation from provider callbacks.

use std::sync::Arc;

use crate::domain::billing::{
    BillingCycle, BillingError, PaymentWebhookVerifier, Subscription, SubscriptionStatus, TxRef,
    WebhookData, WebhookError, WebhookKind,
};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::SubscriptionRepository;

/// Raw webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    pub payload: Vec<u8>,
    pub signature: Option<String>,
}

/// How the delivery was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookDisposition {
    Processed,
    Ignored,
}

/// Handler for payment provider webhooks.
///
/// Only signature problems surface as errors; once a delivery is
/// authenticated it is acknowledged, and store failures inside the
/// dispatch are logged so the provider does not endlessly redeliver.
pub struct HandlePaymentWebhookHandler {
    verifier: PaymentWebhookVerifier,
    subscriptions: Arc<dyn SubscriptionRepository>,
    provider: String,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        verifier: PaymentWebhookVerifier,
        subscriptions: Arc<dyn SubscriptionRepository>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            verifier,
            subscriptions,
            provider: provider.into(),
        }
    }

    pub async fn handle(
        &self,
        command: HandlePaymentWebhookCommand,
    ) -> Result<WebhookDisposition, BillingError> {
        let signature = command
            .signature
            .ok_or(WebhookError::MissingSignature)?;

        let envelope = self
            .verifier
            .verify_and_parse(&command.payload, &signature)?;

        match envelope.kind() {
            WebhookKind::ChargeCompleted => {
                self.on_charge_completed(&envelope.data).await;
                Ok(WebhookDisposition::Processed)
            }
            WebhookKind::SubscriptionActivated => {
                self.on_subscription_activated(&envelope.data).await;
                Ok(WebhookDisposition::Processed)
            }
            WebhookKind::SubscriptionUpdated => {
                self.on_subscription_updated(&envelope.data).await;
                Ok(WebhookDisposition::Processed)
            }
            WebhookKind::Unknown => {
                tracing::debug!(event = %envelope.event, "Ignoring unhandled webhook event");
                Ok(WebhookDisposition::Ignored)
            }
        }
    }

    async fn on_charge_completed(&self, data: &WebhookData) {
        if data.status.as_deref() != Some("successful") {
            tracing::debug!(status = ?data.status, "Charge not successful, skipping");
            return;
        }
        let Some(tx_ref) = parse_tx_ref(data) else {
            tracing::warn!("charge.completed without usable tx_ref");
            return;
        };

        match self
            .subscriptions
            .update_status_by_tx_ref(&tx_ref, SubscriptionStatus::Active)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(tx_ref = %tx_ref, "charge.completed for unknown subscription")
            }
            Err(e) => tracing::error!(tx_ref = %tx_ref, error = %e, "Webhook status update failed"),
        }
    }

    async fn on_subscription_activated(&self, data: &WebhookData) {
        let Some(tx_ref) = parse_tx_ref(data) else {
            tracing::warn!("subscription.activated without usable tx_ref");
            return;
        };
        let Some(user_id) = parse_user_id(data) else {
            tracing::warn!(tx_ref = %tx_ref, "subscription.activated without user identity");
            return;
        };

        // Anything other than an explicit six-month cycle is a monthly term.
        let billing_cycle = data
            .meta
            .as_ref()
            .and_then(|m| m.billing_cycle.as_deref())
            .and_then(|c| c.parse().ok())
            .unwrap_or(BillingCycle::Monthly);

        let subscription = Subscription::activate(
            user_id,
            tx_ref.clone(),
            data.amount.unwrap_or(0),
            data.currency.clone().unwrap_or_else(|| "USD".to_string()),
            billing_cycle,
            self.provider.clone(),
            Timestamp::now(),
        );

        if let Err(e) = self.subscriptions.upsert_by_tx_ref(&subscription).await {
            tracing::error!(tx_ref = %tx_ref, error = %e, "Webhook subscription upsert failed");
        }
    }

    async fn on_subscription_updated(&self, data: &WebhookData) {
        let Some(tx_ref) = parse_tx_ref(data) else {
            tracing::warn!("subscription.updated without usable tx_ref");
            return;
        };
        let Some(status) = data.status.as_deref() else {
            tracing::warn!(tx_ref = %tx_ref, "subscription.updated without status");
            return;
        };

        match self
            .subscriptions
            .update_status_by_tx_ref(&tx_ref, SubscriptionStatus::parse(status))
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(tx_ref = %tx_ref, "subscription.updated for unknown subscription")
            }
            Err(e) => tracing::error!(tx_ref = %tx_ref, error = %e, "Webhook status update failed"),
        }
    }
}

fn parse_tx_ref(data: &WebhookData) -> Option<TxRef> {
    data.tx_ref.as_deref().and_then(|t| TxRef::new(t).ok())
}

fn parse_user_id(data: &WebhookData) -> Option<UserId> {
    let from_customer = data.customer.as_ref().and_then(|c| c.id.as_deref());
    let from_meta = data.meta.as_ref().and_then(|m| m.user_id.as_deref());
    from_customer
        .or(from_meta)
        .and_then(|id| UserId::new(id).ok())
}
