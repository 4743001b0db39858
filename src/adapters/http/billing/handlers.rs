//! HTTP handlers for billing endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::billing::{
    HandlePaymentWebhookCommand, InitializePaymentCommand, VerifyPaymentCommand,
};
use crate::domain::billing::TxRef;
use crate::domain::foundation::ValidationError;

use super::super::auth::AuthenticatedUser;
use super::super::error::ApiError;
use super::super::state::AppState;
use super::dto::{
    InitializePaymentRequest, InitializePaymentResponse, SubscriptionResponse,
    VerifyPaymentRequest, VerifyPaymentResponse,
};

/// POST /api/payment/initialize - Start a hosted checkout session
pub async fn initialize_payment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<InitializePaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.initialize_payment_handler();
    let cmd = InitializePaymentCommand {
        user_id: user.user_id,
        email: user.email,
        name: user.name,
        amount: request.amount,
        billing_cycle: request.billing_cycle,
        currency: request.currency,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(InitializePaymentResponse::from(result)))
}

/// POST /api/payment/verify - Reconcile a payment by transaction reference
pub async fn verify_payment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tx_ref = TxRef::new(request.tx_ref).map_err(|e| {
        ApiError::from(crate::domain::billing::BillingError::from(
            ValidationError::invalid_format("tx_ref", e.to_string()),
        ))
    })?;

    let handler = state.verify_payment_handler();
    let cmd = VerifyPaymentCommand {
        tx_ref,
        session_user_id: user.user_id,
        session_email: user.email,
        session_name: user.name,
    };

    let result = handler.handle(cmd).await?;

    let response = VerifyPaymentResponse {
        success: true,
        subscription: SubscriptionResponse::from(result.subscription),
    };

    Ok(Json(response))
}

/// POST /api/webhooks/flutterwave - Handle provider webhook deliveries
///
/// The raw body is signed; parsing happens only after the signature check.
pub async fn handle_payment_webhook(
    State(state): State<AppState>,
    headers: axum::http::HeaderMap,
    body: axum::body::Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get("verif-hash")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let handler = state.webhook_handler();
    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    handler.handle(cmd).await?;

    Ok(StatusCode::OK)
}
