//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Repository Ports
//!
//! - `UserRepository` - Auth-provider profile persistence
//! - `InviteCodeRepository` - Invite code issuance and atomic claims
//! - `InviteGrantRepository` - Temporary invite access grants
//! - `SubscriptionRepository` - Subscriptions keyed by transaction reference
//!
//! ## Provider Ports
//!
//! - `PaymentGateway` - Hosted checkout and verify-by-reference
//! - `Mailer` - Transactional email

mod user_repository;
mod invite_code_repository;
mod invite_grant_repository;
mod subscription_repository;
mod payment_gateway;
mod mailer;

pub use user_repository::UserRepository;
pub use invite_code_repository::InviteCodeRepository;
pub use invite_grant_repository::InviteGrantRepository;
pub use subscription_repository::SubscriptionRepository;
pub use payment_gateway::{
    ConfirmedPayment, GatewayError, HostedSession, HostedSessionRequest, PaymentGateway,
    VerifyOutcome,
};
pub use mailer::{Mailer, MailerError, PaymentConfirmation};
