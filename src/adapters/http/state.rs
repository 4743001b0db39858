//! Shared application state for the HTTP layer.

use std::sync::Arc;

use crate::application::handlers::billing::{
    HandlePaymentWebhookHandler, InitializePaymentHandler, VerifyPaymentHandler,
};
use crate::application::handlers::entitlement::{
    CheckAccessHandler, GenerateInviteCodeHandler, ListInviteCodesHandler,
    RedeemInviteCodeHandler,
};
use crate::application::handlers::identity::SyncUserHandler;
use crate::domain::billing::PaymentWebhookVerifier;
use crate::ports::{
    InviteCodeRepository, InviteGrantRepository, Mailer, PaymentGateway, SubscriptionRepository,
    UserRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned per request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub invite_codes: Arc<dyn InviteCodeRepository>,
    pub invite_grants: Arc<dyn InviteGrantRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    pub mailer: Arc<dyn Mailer>,

    /// Emails allowed to issue and list invite codes.
    pub admin_emails: Vec<String>,
    /// Where the hosted checkout sends the customer back to.
    pub payment_redirect_url: String,
    /// Secret hash shared with the payment provider for webhook signatures.
    pub webhook_secret: String,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn sync_user_handler(&self) -> SyncUserHandler {
        SyncUserHandler::new(self.users.clone())
    }

    pub fn check_access_handler(&self) -> CheckAccessHandler {
        CheckAccessHandler::new(self.subscriptions.clone(), self.invite_grants.clone())
    }

    pub fn generate_invite_code_handler(&self) -> GenerateInviteCodeHandler {
        GenerateInviteCodeHandler::new(self.invite_codes.clone(), self.admin_emails.clone())
    }

    pub fn list_invite_codes_handler(&self) -> ListInviteCodesHandler {
        ListInviteCodesHandler::new(self.invite_codes.clone(), self.admin_emails.clone())
    }

    pub fn redeem_invite_code_handler(&self) -> RedeemInviteCodeHandler {
        RedeemInviteCodeHandler::new(self.invite_codes.clone(), self.invite_grants.clone())
    }

    pub fn initialize_payment_handler(&self) -> InitializePaymentHandler {
        InitializePaymentHandler::new(
            self.subscriptions.clone(),
            self.payment_gateway.clone(),
            self.payment_redirect_url.clone(),
        )
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.payment_gateway.clone(),
            self.subscriptions.clone(),
            self.mailer.clone(),
        )
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            PaymentWebhookVerifier::new(self.webhook_secret.clone()),
            self.subscriptions.clone(),
            self.payment_gateway.provider_name(),
        )
    }
}
