//! Invite code repository port.

use crate::domain::entitlement::InviteCode;
use crate::domain::foundation::{DomainError, InviteCodeId, Timestamp, UserId};
use async_trait::async_trait;

/// Repository port for invite codes.
///
/// Codes are never deleted; redemption marks them instead.
#[async_trait]
pub trait InviteCodeRepository: Send + Sync {
    /// Save a newly issued code.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the code string collides with an existing one
    /// - `DatabaseError` on persistence failure
    async fn save(&self, code: &InviteCode) -> Result<(), DomainError>;

    /// Check whether a code string is already taken.
    async fn code_exists(&self, code: &str) -> Result<bool, DomainError>;

    /// Find a code by its string form.
    ///
    /// Returns `None` if not found.
    async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, DomainError>;

    /// Atomically claim an unredeemed, active code for a user.
    ///
    /// The write is conditional on the code still being unclaimed, so two
    /// concurrent redeemers cannot both succeed. Returns `false` when the
    /// claim was lost.
    async fn claim(
        &self,
        id: &InviteCodeId,
        redeemed_by: &UserId,
        redeemed_at: Timestamp,
    ) -> Result<bool, DomainError>;

    /// All codes, newest first. Admin listing.
    async fn list_newest_first(&self) -> Result<Vec<InviteCode>, DomainError>;
}
