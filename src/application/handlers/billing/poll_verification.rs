//! VerificationPoller - Bounded retry loop over payment verification.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;

use crate::domain::billing::BillingError;

use super::verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};

/// Retry policy for the poller.
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 12,
        }
    }
}

/// Terminal state of one polling run.
#[derive(Debug)]
pub enum PollOutcome {
    /// The payment was confirmed and recorded.
    Confirmed(VerifyPaymentResult),
    /// Every attempt came back pending.
    Exhausted { attempts: u32 },
    /// A terminal verification error ended the run early.
    Failed(BillingError),
    /// The caller cancelled the run between attempts.
    Cancelled,
}

/// Drives [`VerifyPaymentHandler`] until the payment settles.
///
/// Only `VerificationPending` triggers another attempt; any other error is
/// terminal. The wait between attempts is cancellable.
///
/// The verify endpoint itself stays single-attempt and reports pending back
/// to the caller; this loop is for hosts that want the retries server-side,
/// such as a reconciliation task spawned after checkout.
pub struct VerificationPoller {
    verify: Arc<VerifyPaymentHandler>,
    config: PollConfig,
}

impl VerificationPoller {
    pub fn new(verify: Arc<VerifyPaymentHandler>, config: PollConfig) -> Self {
        Self { verify, config }
    }

    pub async fn run(
        &self,
        command: VerifyPaymentCommand,
        mut cancel: oneshot::Receiver<()>,
    ) -> PollOutcome {
        for attempt in 1..=self.config.max_attempts {
            match self.verify.handle(command.clone()).await {
                Ok(result) => {
                    tracing::info!(tx_ref = %command.tx_ref, attempt, "Payment confirmed");
                    return PollOutcome::Confirmed(result);
                }
                Err(BillingError::VerificationPending) => {
                    tracing::debug!(tx_ref = %command.tx_ref, attempt, "Payment still pending");
                    if attempt == self.config.max_attempts {
                        break;
                    }
                    tokio::select! {
                        _ = &mut cancel => return PollOutcome::Cancelled,
                        _ = tokio::time::sleep(self.config.interval) => {}
                    }
                }
                Err(e) => {
                    tracing::warn!(tx_ref = %command.tx_ref, attempt, error = %e, "Verification failed");
                    return PollOutcome::Failed(e);
                }
            }
        }

        PollOutcome::Exhausted {
            attempts: self.config.max_attempts,
        }
    }
}
