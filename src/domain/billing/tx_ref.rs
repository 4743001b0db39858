//! Transaction reference value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Idempotency key for one payment attempt.
///
/// Minted as `TGE_<unix_millis>_<user_id>` at initialization and echoed
/// back by the payment provider through verification and webhooks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxRef(String);

impl TxRef {
    /// Wraps an existing reference, rejecting empty strings.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("tx_ref"));
        }
        Ok(Self(value))
    }

    /// Mints a fresh reference for a payment attempt.
    pub fn mint(user_id: &UserId, at: Timestamp) -> Self {
        Self(format!("TGE_{}_{}", at.as_unix_millis(), user_id.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
