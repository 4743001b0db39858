//! Axum router configuration for billing endpoints.

use axum::{routing::post, Router};

use super::super::state::AppState;
use super::handlers::{handle_payment_webhook, initialize_payment, verify_payment};

/// Create the billing API router.
///
/// # Routes
///
/// ## User Endpoints (require authentication)
/// - `POST /payment/initialize` - Start a hosted checkout
/// - `POST /payment/verify` - Reconcile a payment by tx_ref
pub fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/payment/initialize", post(initialize_payment))
        .route("/payment/verify", post(verify_payment))
}

/// Create the payment webhook router.
///
/// Separate from the billing routes because webhook deliveries carry no
/// user session; they are authenticated by signature.
///
/// # Routes
/// - `POST /webhooks/flutterwave` - Handle provider webhooks
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/webhooks/flutterwave", post(handle_payment_webhook))
}
