//! Entitlement domain errors.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, ValidationError};

/// Errors from the entitlement operations.
#[derive(Debug, Clone, Error)]
pub enum EntitlementError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User '{email}' is not an administrator")]
    NotAuthorized { email: String },

    #[error("Invite code not found")]
    InviteCodeNotFound,

    #[error("Invite code has already been used")]
    InviteCodeAlreadyUsed,

    #[error("Invite code has expired")]
    InviteCodeExpired,

    #[error("User already has invite access until {expires_at:?}")]
    AlreadyHasInviteAccess { expires_at: Timestamp },

    #[error("Could not generate a unique invite code after {attempts} attempts")]
    GenerationFailed { attempts: u32 },

    #[error("Store error: {0}")]
    Store(DomainError),
}

impl EntitlementError {
    pub fn not_authorized(email: impl Into<String>) -> Self {
        EntitlementError::NotAuthorized { email: email.into() }
    }

    pub fn already_has_invite_access(expires_at: Timestamp) -> Self {
        EntitlementError::AlreadyHasInviteAccess { expires_at }
    }

    pub fn generation_failed(attempts: u32) -> Self {
        EntitlementError::GenerationFailed { attempts }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EntitlementError::Validation(_) => ErrorCode::ValidationFailed,
            EntitlementError::NotAuthorized { .. } => ErrorCode::Forbidden,
            EntitlementError::InviteCodeNotFound => ErrorCode::InviteCodeNotFound,
            EntitlementError::InviteCodeAlreadyUsed => ErrorCode::InviteCodeUsed,
            EntitlementError::InviteCodeExpired => ErrorCode::InviteCodeExpired,
            EntitlementError::AlreadyHasInviteAccess { .. } => ErrorCode::InviteAccessExists,
            EntitlementError::GenerationFailed { .. } => ErrorCode::GenerationFailed,
            EntitlementError::Store(_) => ErrorCode::DatabaseError,
        }
    }

    /// User-facing message for the API response.
    pub fn message(&self) -> String {
        match self {
            EntitlementError::Validation(e) => e.to_string(),
            EntitlementError::NotAuthorized { .. } => {
                "Unauthorized. Admin access required.".to_string()
            }
            EntitlementError::InviteCodeNotFound => "Invalid invite code".to_string(),
            EntitlementError::InviteCodeAlreadyUsed => {
                "This invite code has already been used".to_string()
            }
            EntitlementError::InviteCodeExpired => "This invite code has expired".to_string(),
            EntitlementError::AlreadyHasInviteAccess { .. } => {
                "You already have active invite access".to_string()
            }
            EntitlementError::GenerationFailed { .. } => {
                "Failed to generate a unique invite code".to_string()
            }
            EntitlementError::Store(_) => "Internal server error".to_string(),
        }
    }
}

impl From<DomainError> for EntitlementError {
    fn from(err: DomainError) -> Self {
        EntitlementError::Store(err)
    }
}
