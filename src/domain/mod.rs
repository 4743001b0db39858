//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `identity` - User profiles mirrored from the auth provider
//! - `entitlement` - Invite codes, grants, and the access decision
//! - `billing` - Subscriptions and payment reconciliation rules

pub mod billing;
pub mod entitlement;
pub mod foundation;
pub mod identity;
