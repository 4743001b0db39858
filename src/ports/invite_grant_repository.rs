//! Invite access grant repository port.

use crate::domain::entitlement::InviteAccessGrant;
use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

/// Repository port for invite access grants.
#[async_trait]
pub trait InviteGrantRepository: Send + Sync {
    /// Save a newly issued grant.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, grant: &InviteAccessGrant) -> Result<(), DomainError>;

    /// Most recent active grant for a user, if any.
    ///
    /// Expiry is not filtered here; callers apply the domain predicate so
    /// the inclusive boundary rule lives in one place.
    async fn find_active_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<InviteAccessGrant>, DomainError>;
}
