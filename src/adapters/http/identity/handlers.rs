//! HTTP handlers for identity endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::identity::SyncUserCommand;

use super::super::auth::AuthenticatedUser;
use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{SyncUserRequest, UserProfileResponse};

/// POST /api/users/sync - Upsert the signed-in user's profile
pub async fn sync_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<SyncUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.sync_user_handler();
    let cmd = SyncUserCommand {
        user_id: user.user_id,
        email: request.email,
        display_name: request.display_name,
        avatar_url: request.avatar_url,
    };

    let profile = handler.handle(cmd).await?;

    Ok(Json(UserProfileResponse::from(profile)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::AppState;
    use crate::domain::billing::{Subscription, SubscriptionStatus, TxRef};
    use crate::domain::entitlement::{InviteAccessGrant, InviteCode};
    use crate::domain::foundation::{DomainError, InviteCodeId, Timestamp, UserId};
    use crate::domain::identity::UserProfile;
    use crate::ports::{
        GatewayError, HostedSession, HostedSessionRequest, InviteCodeRepository,
        InviteGrantRepository, Mailer, MailerError, PaymentConfirmation, PaymentGateway,
        SubscriptionRepository, UserRepository, VerifyOutcome,
    };
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use std::sync::{Arc, Mutex};

    struct MockUserRepository {
        saved: Mutex<Vec<UserProfile>>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn upsert(&self, profile: &UserProfile) -> Result<(), DomainError> {
            self.saved.lock().unwrap().push(profile.clone());
            Ok(())
        }
    }

    struct MockInviteCodeRepository;

    #[async_trait]
    impl InviteCodeRepository for MockInviteCodeRepository {
        async fn save(&self, _code: &InviteCode) -> Result<(), DomainError> {
            Ok(())
        }

        async fn code_exists(&self, _code: &str) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn find_by_code(&self, _code: &str) -> Result<Option<InviteCode>, DomainError> {
            Ok(None)
        }

        async fn claim(
            &self,
            _id: &InviteCodeId,
            _redeemed_by: &UserId,
            _redeemed_at: Timestamp,
        ) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn list_newest_first(&self) -> Result<Vec<InviteCode>, DomainError> {
            Ok(vec![])
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

    struct MockSubscriptionRepository;

    #[async_trait]
    impl SubscriptionRepository for MockSubscriptionRepository {
        async fn find_for_user(&self, _user_id: &UserId) -> Result<Vec<Subscription>, DomainError> {
            Ok(vec![])
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

    fn test_state() -> AppState {
        AppState {
            users: Arc::new(MockUserRepository {
                saved: Mutex::new(Vec::new()),
            }),
            invite_codes: Arc::new(MockInviteCodeRepository),
            invite_grants: Arc::new(MockInviteGrantRepository),
            subscriptions: Arc::new(MockSubscriptionRepository),
            payment_gateway: Arc::new(MockPaymentGateway),
            mailer: Arc::new(MockMailer),
            admin_emails: vec![],
            payment_redirect_url: "https://app.test/payment/success".to_string(),
            webhook_secret: "whsec".to_string(),
        }
    }

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: UserId::new("user-1").unwrap(),
            email: "alice@example.com".to_string(),
            name: Some("Alice".to_string()),
        }
    }

    #[tokio::test]
    async fn sync_user_upserts_profile() {
        let state = test_state();
        let request = SyncUserRequest {
            email: "alice@example.com".to_string(),
            display_name: Some("Alice".to_string()),
            avatar_url: None,
        };

        let result = sync_user(State(state), test_user(), Json(request)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn sync_user_rejects_invalid_email() {
        let state = test_state();
        let request = SyncUserRequest {
            email: "not-an-email".to_string(),
            display_name: None,
            avatar_url: None,
        };

        let result = sync_user(State(state), test_user(), Json(request)).await;
        let response = result.err().map(|e| e.into_response()).unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
