//! VerifyPaymentHandler - Confirms a payment and records the subscription.

use std::sync::Arc;

use crate::domain::billing::{BillingError, Subscription, TxRef};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{
    Mailer, PaymentConfirmation, PaymentGateway, SubscriptionRepository, VerifyOutcome,
};

/// Command to verify a payment attempt.
///
/// The session fields are fallbacks for metadata the provider may omit.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub tx_ref: TxRef,
    pub session_user_id: UserId,
    pub session_email: String,
    pub session_name: Option<String>,
}

/// Result of a confirmed verification.
#[derive(Debug, Clone)]
pub struct VerifyPaymentResult {
    pub subscription: Subscription,
    /// True when this call created the record, false on re-verification.
    pub newly_recorded: bool,
}

/// Handler for payment verification.
///
/// Upserts by `tx_ref`, so re-verifying a confirmed payment converges on
/// the same record. The confirmation email goes out only on the first
/// transition into existence; a mail failure never fails the verification.
pub struct VerifyPaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    mailer: Arc<dyn Mailer>,
}

impl VerifyPaymentHandler {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            gateway,
            subscriptions,
            mailer,
        }
    }

    pub async fn handle(
        &self,
        command: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, BillingError> {
        let outcome = self
            .gateway
            .verify_by_reference(&command.tx_ref)
            .await
            .map_err(|e| BillingError::verification_failed(e.to_string()))?;

        let payment = match outcome {
            VerifyOutcome::Confirmed(payment) => payment,
            VerifyOutcome::Pending => return Err(BillingError::VerificationPending),
        };

        let billing_cycle = payment
            .billing_cycle
            .ok_or_else(|| BillingError::verification_failed("missing billing cycle metadata"))?;

        let user_id = match payment.user_id.as_deref() {
            Some(id) => UserId::new(id)
                .map_err(|_| BillingError::verification_failed("empty user id metadata"))?,
            None => command.session_user_id.clone(),
        };

        // Existence check first: it decides whether the email goes out.
        let existing = self.subscriptions.find_by_tx_ref(&command.tx_ref).await?;
        let newly_recorded = existing.is_none();

        let subscription = Subscription::activate(
            user_id,
            command.tx_ref.clone(),
            payment.amount,
            payment.currency.clone(),
            billing_cycle,
            self.gateway.provider_name(),
            Timestamp::now(),
        );
        self.subscriptions.upsert_by_tx_ref(&subscription).await?;

        if newly_recorded {
            let confirmation = PaymentConfirmation {
                to_email: payment
                    .customer_email
                    .unwrap_or(command.session_email),
                to_name: payment.customer_name.or(command.session_name),
                amount: payment.amount,
                currency: payment.currency,
                billing_cycle,
            };
            if let Err(e) = self.mailer.send_payment_confirmation(&confirmation).await {
                tracing::warn!(
                    tx_ref = %command.tx_ref,
                    error = %e,
                    "Payment confirmation email failed"
                );
            }
        }

        Ok(VerifyPaymentResult {
            subscription,
            newly_recorded,
        })
    }
}
