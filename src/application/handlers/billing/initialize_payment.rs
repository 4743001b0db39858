//! InitializePaymentHandler - Opens a hosted checkout session.

use std::sync::Arc;

use crate::domain::billing::{BillingCycle, BillingError, TxRef};
use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::ports::{HostedSessionRequest, PaymentGateway, SubscriptionRepository};

/// Command to start a payment attempt.
#[derive(Debug, Clone)]
pub struct InitializePaymentCommand {
    pub user_id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub amount: i64,
    pub billing_cycle: BillingCycle,
    pub currency: Option<String>,
}

/// Result of a successful initialization.
#[derive(Debug, Clone)]
pub struct InitializePaymentResult {
    pub payment_url: String,
    pub tx_ref: TxRef,
}

/// Handler for payment initialization.
///
/// Mints the transaction reference that keys the whole reconciliation
/// lifecycle, then delegates to the gateway's hosted checkout.
pub struct InitializePaymentHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    gateway: Arc<dyn PaymentGateway>,
    redirect_url: String,
}

impl InitializePaymentHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        gateway: Arc<dyn PaymentGateway>,
        redirect_url: String,
    ) -> Self {
        Self {
            subscriptions,
            gateway,
            redirect_url,
        }
    }

    pub async fn handle(
        &self,
        command: InitializePaymentCommand,
    ) -> Result<InitializePaymentResult, BillingError> {
        if command.amount <= 0 {
            return Err(ValidationError::invalid_format(
                "amount",
                "must be a positive amount",
            )
            .into());
        }

        if command.billing_cycle == BillingCycle::Monthly {
            self.reject_duplicate_monthly(&command.user_id).await?;
        }

        let now = Timestamp::now();
        let tx_ref = TxRef::mint(&command.user_id, now);

        let request = HostedSessionRequest {
            tx_ref: tx_ref.clone(),
            amount: command.amount,
            currency: command.currency.unwrap_or_else(|| "USD".to_string()),
            redirect_url: self.redirect_url.clone(),
            customer_email: command.email,
            customer_name: command.name,
            user_id: command.user_id,
            billing_cycle: command.billing_cycle,
        };

        let session = self
            .gateway
            .create_hosted_session(&request)
            .await
            .map_err(|e| BillingError::initialization_failed(e.to_string()))?;

        Ok(InitializePaymentResult {
            payment_url: session.payment_url,
            tx_ref,
        })
    }

    /// Advisory guard: a failing store check must not block checkout.
    async fn reject_duplicate_monthly(&self, user_id: &UserId) -> Result<(), BillingError> {
        match self.subscriptions.find_for_user(user_id).await {
            Ok(existing) => {
                let now = Timestamp::now();
                let has_active_monthly = existing
                    .iter()
                    .any(|s| s.billing_cycle == BillingCycle::Monthly && s.grants_access_at(now));
                if has_active_monthly {
                    return Err(BillingError::DuplicateMonthlySubscription);
                }
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Duplicate-subscription check failed, proceeding with initialization"
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::{Subscription, SubscriptionStatus};
    use crate::domain::foundation::DomainError;
    use crate::ports::{ConfirmedPayment, GatewayError, HostedSession, VerifyOutcome};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockSubscriptionRepository {
        subscriptions: Vec<Subscription>,
        fail_read: bool,
    }

    impl MockSubscriptionRepository {
        fn with(subscriptions: Vec<Subscription>) -> Self {
            Self {
                subscriptions,
                fail_read: false,
            }
        }

        fn failing() -> Self {
            Self {
                subscriptions: vec![],
                fail_read: true,
            }
        }
    }

    #[async_trait]
    impl SubscriptionRepository for MockSubscriptionRepository {
        async fn find_for_user(&self, _user_id: &UserId) -> Result<Vec<Subscription>, DomainError> {
            if self.fail_read {
                return Err(DomainError::database("Simulated read failure"));
            }
            Ok(self.subscriptions.clone())
        }

        async fn find_by_tx_ref(
            &self,
            _tx_ref: &TxRef,
        ) -> Result<Option<Subscription>, DomainError> {
            Ok(None)
        }

        async fn upsert_by_tx_ref(&self, _subscription: &Subscription) -> Result<(), DomainError> {
            Ok(())
        }

        async fn update_status_by_tx_ref(
            &self,
            _tx_ref: &TxRef,
            _status: SubscriptionStatus,
        ) -> Result<bool, DomainError> {
            Ok(false)
        }
    }

    struct MockPaymentGateway {
        requests: Mutex<Vec<HostedSessionRequest>>,
        fail: bool,
    }

    impl MockPaymentGateway {
        fn new() -> Self {
            Self {
                requests: Mutex::new(vec![]),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                requests: Mutex::new(vec![]),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for MockPaymentGateway {
        fn provider_name(&self) -> &'static str {
            "mock"
        }

        async fn create_hosted_session(
            &self,
            request: &HostedSessionRequest,
        ) -> Result<HostedSession, GatewayError> {
            if self.fail {
                return Err(GatewayError::new("api_error", "Simulated gateway failure"));
            }
            self.requests.lock().unwrap().push(request.clone());
            Ok(HostedSession {
                payment_url: format!("https://checkout.test/{}", request.tx_ref),
            })
        }

        async fn verify_by_reference(
            &self,
            _tx_ref: &TxRef,
        ) -> Result<VerifyOutcome, GatewayError> {
            Ok(VerifyOutcome::Confirmed(ConfirmedPayment {
                tx_ref: TxRef::new("unused").unwrap(),
                amount: 0,
                currency: "USD".to_string(),
                billing_cycle: None,
                user_id: None,
                customer_email: None,
                customer_name: None,
            }))
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn command(cycle: BillingCycle) -> InitializePaymentCommand {
        InitializePaymentCommand {
            user_id: user(),
            email: "alice@example.com".to_string(),
            name: Some("Alice".to_string()),
            amount: 199,
            billing_cycle: cycle,
            currency: None,
        }
    }

    fn active_monthly() -> Subscription {
        Subscription::activate(
            user(),
            TxRef::mint(&user(), Timestamp::now()),
            199,
            "USD",
            BillingCycle::Monthly,
            "flutterwave",
            Timestamp::now(),
        )
    }

    fn handler(
        repo: MockSubscriptionRepository,
        gateway: Arc<MockPaymentGateway>,
    ) -> InitializePaymentHandler {
        InitializePaymentHandler::new(
            Arc::new(repo),
            gateway,
            "https://app.test/payment/success".to_string(),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn opens_a_session_with_minted_tx_ref() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = handler(MockSubscriptionRepository::with(vec![]), gateway.clone());

        let result = handler.handle(command(BillingCycle::SixMonths)).await.unwrap();

        assert!(result.tx_ref.as_str().starts_with("TGE_"));
        assert!(result.tx_ref.as_str().ends_with("_user-1"));
        assert!(result.payment_url.starts_with("https://checkout.test/"));

        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].currency, "USD");
        assert_eq!(requests[0].redirect_url, "https://app.test/payment/success");
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = handler(MockSubscriptionRepository::with(vec![]), gateway);

        let mut cmd = command(BillingCycle::Monthly);
        cmd.amount = 0;

        let result = handler.handle(cmd).await;
        assert!(matches!(result, Err(BillingError::Validation(_))));
    }

    #[tokio::test]
    async fn rejects_duplicate_active_monthly() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = handler(
            MockSubscriptionRepository::with(vec![active_monthly()]),
            gateway.clone(),
        );

        let result = handler.handle(command(BillingCycle::Monthly)).await;
        assert!(matches!(
            result,
            Err(BillingError::DuplicateMonthlySubscription)
        ));
        assert!(gateway.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn six_month_cycle_skips_the_monthly_guard() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = handler(
            MockSubscriptionRepository::with(vec![active_monthly()]),
            gateway,
        );

        assert!(handler.handle(command(BillingCycle::SixMonths)).await.is_ok());
    }

    #[tokio::test]
    async fn guard_check_failure_does_not_block_initialization() {
        let gateway = Arc::new(MockPaymentGateway::new());
        let handler = handler(MockSubscriptionRepository::failing(), gateway);

        assert!(handler.handle(command(BillingCycle::Monthly)).await.is_ok());
    }

    #[tokio::test]
    async fn gateway_failure_is_an_initialization_error() {
        let gateway = Arc::new(MockPaymentGateway::failing());
        let handler = handler(MockSubscriptionRepository::with(vec![]), gateway);

        let result = handler.handle(command(BillingCycle::Monthly)).await;
        assert!(matches!(
            result,
            Err(BillingError::InitializationFailed { .. })
        ));
    }
}
