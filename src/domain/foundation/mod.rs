//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form
//! the vocabulary of the InferCircle access domain.

mod ids;
mod timestamp;
mod errors;

pub use ids::{InviteCodeId, InviteGrantId, SubscriptionId, UserId};
pub use timestamp::Timestamp;
pub use errors::{DomainError, ErrorCode, ValidationError};
