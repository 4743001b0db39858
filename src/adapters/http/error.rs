//! API error type and JSON error body.

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::billing::{BillingError, WebhookError};
use crate::domain::entitlement::EntitlementError;
use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// API error that converts domain errors to HTTP responses.
pub enum ApiError {
    Entitlement(EntitlementError),
    Billing(BillingError),
    Internal(DomainError),
}

impl From<EntitlementError> for ApiError {
    fn from(err: EntitlementError) -> Self {
        Self::Entitlement(err)
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        Self::Billing(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::Internal(err)
    }
}

fn entitlement_status(err: &EntitlementError) -> StatusCode {
    match err {
        EntitlementError::Validation(_) => StatusCode::BAD_REQUEST,
        EntitlementError::NotAuthorized { .. } => StatusCode::FORBIDDEN,
        EntitlementError::InviteCodeNotFound => StatusCode::NOT_FOUND,
        // The invite endpoints report redemption problems as 400 with a
        // human-readable reason, not as conflicts.
        EntitlementError::InviteCodeAlreadyUsed
        | EntitlementError::InviteCodeExpired
        | EntitlementError::AlreadyHasInviteAccess { .. } => StatusCode::BAD_REQUEST,
        EntitlementError::GenerationFailed { .. } | EntitlementError::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn billing_status(err: &BillingError) -> StatusCode {
    match err {
        BillingError::Validation(_) => StatusCode::BAD_REQUEST,
        BillingError::DuplicateMonthlySubscription => StatusCode::CONFLICT,
        // A pending verification is a retry signal, not a terminal failure.
        BillingError::VerificationPending => StatusCode::BAD_REQUEST,
        BillingError::Webhook(e) => match e {
            WebhookError::MissingSignature | WebhookError::MalformedPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            WebhookError::SignatureMismatch => StatusCode::UNAUTHORIZED,
            WebhookError::MissingSecret => StatusCode::INTERNAL_SERVER_ERROR,
        },
        BillingError::InitializationFailed { .. }
        | BillingError::VerificationFailed { .. }
        | BillingError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match &self {
            ApiError::Entitlement(err) => (
                entitlement_status(err),
                ErrorResponse::new(err.code().to_string(), err.message()),
            ),
            ApiError::Billing(err) => (
                billing_status(err),
                ErrorResponse::new(err.code().to_string(), err.message()),
            ),
            ApiError::Internal(err) => match err.code {
                ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(err.code.to_string(), err.message.clone()),
                ),
                _ => {
                    tracing::error!(error = %err, "Unhandled store error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorResponse::new("INTERNAL_ERROR", "Internal server error"),
                    )
                }
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, ValidationError};

    #[test]
    fn not_authorized_maps_to_403() {
        let err = ApiError::from(EntitlementError::not_authorized("a@b.c"));
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn unknown_code_maps_to_404() {
        let err = ApiError::from(EntitlementError::InviteCodeNotFound);
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn used_code_maps_to_400() {
        let err = ApiError::from(EntitlementError::InviteCodeAlreadyUsed);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn existing_grant_maps_to_400() {
        let err = ApiError::from(EntitlementError::already_has_invite_access(Timestamp::now()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_monthly_maps_to_409() {
        let err = ApiError::from(BillingError::DuplicateMonthlySubscription);
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn pending_verification_maps_to_400() {
        let err = ApiError::from(BillingError::VerificationPending);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn signature_mismatch_maps_to_401() {
        let err = ApiError::from(BillingError::from(WebhookError::SignatureMismatch));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn missing_signature_maps_to_400() {
        let err = ApiError::from(BillingError::from(WebhookError::MissingSignature));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn malformed_payload_maps_to_400() {
        let err = ApiError::from(BillingError::from(WebhookError::MalformedPayload(
            "expected value at line 1".to_string(),
        )));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::from(BillingError::from(ValidationError::empty_field("amount")));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn domain_validation_maps_to_400() {
        let err = ApiError::from(DomainError::validation("email", "missing @ symbol"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_maps_to_500() {
        let err = ApiError::from(DomainError::database("connection refused"));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
