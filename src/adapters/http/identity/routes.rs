//! Axum router configuration for identity endpoints.

use axum::{routing::post, Router};

use super::super::state::AppState;
use super::handlers::sync_user;

/// Create the identity API router.
///
/// # Routes
/// - `POST /users/sync` - Upsert the signed-in user's profile
pub fn identity_routes() -> Router<AppState> {
    Router::new().route("/users/sync", post(sync_user))
}
