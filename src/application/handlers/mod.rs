//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod billing;
pub mod entitlement;
pub mod identity;
