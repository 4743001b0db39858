//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::billing::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, InitializePaymentCommand,
    InitializePaymentHandler, InitializePaymentResult, PollConfig, PollOutcome,
    VerificationPoller, VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult,
    WebhookDisposition,
};
pub use handlers::entitlement::{
    CheckAccessHandler, CheckAccessQuery, GenerateInviteCodeCommand, GenerateInviteCodeHandler,
    ListInviteCodesHandler, ListInviteCodesQuery, RedeemInviteCodeCommand,
    RedeemInviteCodeHandler, RedeemInviteCodeResult,
};
pub use handlers::identity::{SyncUserCommand, SyncUserHandler};
