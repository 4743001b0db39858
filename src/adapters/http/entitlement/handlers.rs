//! HTTP handlers for entitlement endpoints.

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::entitlement::{
    CheckAccessQuery, GenerateInviteCodeCommand, ListInviteCodesQuery, RedeemInviteCodeCommand,
};
use crate::domain::foundation::UserId;

use super::super::auth::AuthenticatedUser;
use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{
    AccessStatusQuery, AccessStatusResponse, GenerateInviteCodeResponse, InviteCodeResponse,
    ListInviteCodesResponse, RedeemInviteCodeRequest, RedeemInviteCodeResponse,
};

/// POST /api/invite-codes - Generate a new invite code (admin only)
pub async fn generate_invite_code(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.generate_invite_code_handler();
    let cmd = GenerateInviteCodeCommand {
        requester_id: user.user_id,
        requester_email: user.email,
    };

    let code = handler.handle(cmd).await?;

    let response = GenerateInviteCodeResponse {
        success: true,
        invite_code: InviteCodeResponse::from(code),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/invite-codes - List invite codes, newest first (admin only)
pub async fn list_invite_codes(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.list_invite_codes_handler();
    let query = ListInviteCodesQuery {
        requester_email: user.email,
    };

    let codes = handler.handle(query).await?;

    let response = ListInviteCodesResponse {
        invite_codes: codes.into_iter().map(InviteCodeResponse::from).collect(),
    };

    Ok(Json(response))
}

/// POST /api/invite-codes/redeem - Redeem an invite code for temporary access
pub async fn redeem_invite_code(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<RedeemInviteCodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.redeem_invite_code_handler();
    let cmd = RedeemInviteCodeCommand {
        user_id: user.user_id,
        code: request.code,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(RedeemInviteCodeResponse::from(result)))
}

/// GET /api/subscription/status?user_id= - Evaluate the access decision
pub async fn get_access_status(
    State(state): State<AppState>,
    Query(query): Query<AccessStatusQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = query
        .user_id
        .as_deref()
        .map(UserId::new)
        .transpose()
        .map_err(crate::domain::entitlement::EntitlementError::from)?
        .ok_or_else(|| {
            crate::domain::entitlement::EntitlementError::from(
                crate::domain::foundation::ValidationError::empty_field("user_id"),
            )
        })?;

    let handler = state.check_access_handler();
    let status = handler.handle(CheckAccessQuery { user_id }).await?;

    Ok(Json(AccessStatusResponse::from(status)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::AppState;
    use crate::domain::billing::{BillingCycle, Subscription, SubscriptionStatus, TxRef};
    use crate::domain::entitlement::{InviteAccessGrant, InviteCode};
    use crate::domain::foundation::{DomainError, InviteCodeId, Timestamp};
    use crate::domain::identity::UserProfile;
    use crate::ports::{
        GatewayError, HostedSession, HostedSessionRequest, InviteCodeRepository,
        InviteGrantRepository, Mailer, MailerError, PaymentConfirmation, PaymentGateway,
        SubscriptionRepository, UserRepository, VerifyOutcome,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockUserRepository;

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn upsert(&self, _profile: &UserProfile) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct MockInviteCodeRepository {
        codes: Mutex<Vec<InviteCode>>,
    }

    impl MockInviteCodeRepository {
        fn new() -> Self {
            Self {
                codes: Mutex::new(Vec::new()),
            }
        }

        fn with_code(code: InviteCode) -> Self {
            Self {
                codes: Mutex::new(vec![code]),
            }
        }
    }

    #[async_trait]
    impl InviteCodeRepository for MockInviteCodeRepository {
        async fn save(&self, code: &InviteCode) -> Result<(), DomainError> {
            self.codes.lock().unwrap().push(code.clone());
            Ok(())
        }

        async fn code_exists(&self, code: &str) -> Result<bool, DomainError> {
            Ok(self.codes.lock().unwrap().iter().any(|c| c.code == code))
        }

        async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, DomainError> {
            Ok(self
                .codes
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.code == code)
                .cloned())
        }

        async fn claim(
            &self,
            id: &InviteCodeId,
            redeemed_by: &UserId,
            redeemed_at: Timestamp,
        ) -> Result<bool, DomainError> {
            let mut codes = self.codes.lock().unwrap();
            match codes
                .iter_mut()
                .find(|c| &c.id == id && c.redeemed_by.is_none())
            {
                Some(code) => {
                    code.redeemed_by = Some(redeemed_by.clone());
                    code.redeemed_at = Some(redeemed_at);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn list_newest_first(&self) -> Result<Vec<InviteCode>, DomainError> {
            Ok(self.codes.lock().unwrap().clone())
        }
    }

    struct MockInviteGrantRepository;

    #[async_trait]
    impl InviteGrantRepository for MockInviteGrantRepository {
        async fn save(&self, _grant: &InviteAccessGrant) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_active_for_user(
            &self,
            _user_id: &UserId,
        ) -> Result<Option<InviteAccessGrant>, DomainError> {
            Ok(None)
        }
    }

    struct MockSubscriptionRepository {
        subscriptions: Vec<Subscription>,
    }

    #[async_trait]
    impl SubscriptionRepository for MockSubscriptionRepository {
        async fn find_for_user(&self, _user_id: &UserId) -> Result<Vec<Subscription>, DomainError> {
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

    struct MockPaymentGateway;

    #[async_trait]
    impl PaymentGateway for MockPaymentGateway {
        fn provider_name(&self) -> &'static str {
            "flutterwave"
        }

        async fn create_hosted_session(
            &self,
            _request: &HostedSessionRequest,
        ) -> Result<HostedSession, GatewayError> {
            Ok(HostedSession {
                payment_url: "https://checkout.test/session".to_string(),
            })
        }

        async fn verify_by_reference(
            &self,
            _tx_ref: &TxRef,
        ) -> Result<VerifyOutcome, GatewayError> {
            Ok(VerifyOutcome::Pending)
        }
    }

    struct MockMailer;

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send_payment_confirmation(
            &self,
            _message: &PaymentConfirmation,
        ) -> Result<(), MailerError> {
            Ok(())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn admin_user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::new("admin-1").unwrap(),
            email: "admin@infercircle.com".to_string(),
            name: Some("Admin".to_string()),
        }
    }

    fn member_user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::new("user-1").unwrap(),
            email: "user@example.com".to_string(),
            name: None,
        }
    }

    fn active_subscription(user_id: &str) -> Subscription {
        Subscription::activate(
            UserId::new(user_id).unwrap(),
            TxRef::new("TGE_1_u").unwrap(),
            199,
            "USD".to_string(),
            BillingCycle::Monthly,
            "flutterwave".to_string(),
            Timestamp::now(),
        )
    }

    fn test_state(codes: MockInviteCodeRepository, subscriptions: Vec<Subscription>) -> AppState {
        AppState {
            users: Arc::new(MockUserRepository),
            invite_codes: Arc::new(codes),
            invite_grants: Arc::new(MockInviteGrantRepository),
            subscriptions: Arc::new(MockSubscriptionRepository { subscriptions }),
            payment_gateway: Arc::new(MockPaymentGateway),
            mailer: Arc::new(MockMailer),
            admin_emails: vec!["admin@infercircle.com".to_string()],
            payment_redirect_url: "https://app.test/payment/success".to_string(),
            webhook_secret: "whsec".to_string(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn admin_generates_invite_code() {
        let state = test_state(MockInviteCodeRepository::new(), vec![]);

        let result = generate_invite_code(State(state), admin_user()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn non_admin_cannot_generate_invite_code() {
        let state = test_state(MockInviteCodeRepository::new(), vec![]);

        let result = generate_invite_code(State(state), member_user()).await;
        let response = result.err().map(|e| e.into_response()).unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn redeem_unknown_code_returns_404() {
        let state = test_state(MockInviteCodeRepository::new(), vec![]);
        let request = RedeemInviteCodeRequest {
            code: "NOPE0000".to_string(),
        };

        let result = redeem_invite_code(State(state), member_user(), Json(request)).await;
        let response = result.err().map(|e| e.into_response()).unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn redeem_valid_code_succeeds() {
        let code = InviteCode::issue(
            "AB12CD34".to_string(),
            UserId::new("admin-1").unwrap(),
            Timestamp::now(),
        )
        .unwrap();
        let state = test_state(MockInviteCodeRepository::with_code(code), vec![]);
        let request = RedeemInviteCodeRequest {
            code: "AB12CD34".to_string(),
        };

        let result = redeem_invite_code(State(state), member_user(), Json(request)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn access_status_requires_user_id() {
        let state = test_state(MockInviteCodeRepository::new(), vec![]);
        let query = AccessStatusQuery { user_id: None };

        let result = get_access_status(State(state), Query(query)).await;
        let response = result.err().map(|e| e.into_response()).unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn access_status_reflects_active_subscription() {
        let state = test_state(
            MockInviteCodeRepository::new(),
            vec![active_subscription("user-1")],
        );
        let query = AccessStatusQuery {
            user_id: Some("user-1".to_string()),
        };

        let result = get_access_status(State(state), Query(query)).await;
        assert!(result.is_ok());
    }
}
