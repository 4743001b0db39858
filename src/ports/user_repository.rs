//! User profile repository port.

use crate::domain::foundation::DomainError;
use crate::domain::identity::UserProfile;
use async_trait::async_trait;

/// Repository port for auth-provider user profiles.
///
/// The provider id is the primary key; sign-ins overwrite the mutable
/// profile fields.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the profile, or update it when the user already exists.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert(&self, profile: &UserProfile) -> Result<(), DomainError>;
}
