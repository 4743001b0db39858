//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum REST API
//! - `postgres` - Repository implementations over sqlx
//! - `flutterwave` - Payment gateway client
//! - `email` - Transactional mail via Resend

pub mod email;
pub mod flutterwave;
pub mod http;
pub mod postgres;
