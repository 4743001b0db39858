//! Axum router configuration for entitlement endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    generate_invite_code, get_access_status, list_invite_codes, redeem_invite_code,
};

/// Create the entitlement API router.
///
/// # Routes
///
/// ## Admin Endpoints
/// - `POST /invite-codes` - Generate a new invite code
/// - `GET /invite-codes` - List invite codes, newest first
///
/// ## User Endpoints
/// - `POST /invite-codes/redeem` - Redeem an invite code
/// - `GET /subscription/status` - Evaluate the access decision
pub fn entitlement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/invite-codes",
            post(generate_invite_code).get(list_invite_codes),
        )
        .route("/invite-codes/redeem", post(redeem_invite_code))
        .route("/subscription/status", get(get_access_status))
}
