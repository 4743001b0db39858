//! Outbound email port.

use crate::domain::billing::BillingCycle;
use async_trait::async_trait;
use thiserror::Error;

/// Payment confirmation message, sent once per subscription.
#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub to_email: String,
    pub to_name: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub billing_cycle: BillingCycle,
}

/// Error from the mail provider.
#[derive(Debug, Clone, Error)]
pub enum MailerError {
    #[error("Mail provider request failed: {0}")]
    RequestFailed(String),

    #[error("Mail provider rejected the message: {0}")]
    Rejected(String),
}

/// Port for transactional email.
///
/// Delivery failures are advisory; callers log and continue.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_payment_confirmation(
        &self,
        message: &PaymentConfirmation,
    ) -> Result<(), MailerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn mailer_is_object_safe() {
        fn _accepts_dyn(_mailer: &dyn Mailer) {}
    }
}
