//! Identity-provider user profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// Profile mirrored from the external auth provider.
///
/// Upserted on every sign-in; the provider remains the source of truth
/// for the id and email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: Timestamp,
}

impl UserProfile {
    /// Creates a profile, validating the email shape.
    pub fn new(
        id: UserId,
        email: impl Into<String>,
        display_name: Option<String>,
        avatar_url: Option<String>,
        updated_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }
        Ok(Self {
            id,
            email,
            display_name,
            avatar_url,
            updated_at,
        })
    }

    /// Email lowered for case-insensitive comparison.
    pub fn normalized_email(&self) -> String {
        self.email.to_lowercase()
    }
}
