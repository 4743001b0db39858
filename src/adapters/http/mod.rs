//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter for endpoint exposure.

pub mod auth;
pub mod billing;
pub mod entitlement;
pub mod error;
pub mod identity;
pub mod state;

use axum::Router;

pub use auth::AuthenticatedUser;
pub use error::{ApiError, ErrorResponse};
pub use state::AppState;

/// Create the complete API router, suitable for nesting under `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(entitlement::entitlement_routes())
        .merge(billing::billing_routes())
        .merge(billing::webhook_routes())
        .merge(identity::identity_routes())
}
