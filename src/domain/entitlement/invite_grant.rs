//! Temporary access grant created by redeeming an invite code.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InviteCodeId, InviteGrantId, Timestamp, UserId};

/// Days of access a redeemed invite code grants.
pub const GRANT_TTL_DAYS: i64 = 3;

/// Time-bounded access obtained through an invite code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InviteAccessGrant {
    pub id: InviteGrantId,
    pub user_id: UserId,
    pub invite_code_id: InviteCodeId,
    pub expires_at: Timestamp,
    pub is_active: bool,
    pub created_at: Timestamp,
}

impl InviteAccessGrant {
    /// Issues a grant expiring [`GRANT_TTL_DAYS`] from `now`.
    pub fn issue(user_id: UserId, invite_code_id: InviteCodeId, now: Timestamp) -> Self {
        Self {
            id: InviteGrantId::new(),
            user_id,
            invite_code_id,
            expires_at: now.add_days(GRANT_TTL_DAYS),
            is_active: true,
            created_at: now,
        }
    }

    /// Whether this grant provides access at the given instant.
    ///
    /// The expiry bound is inclusive.
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        self.is_active && !self.expires_at.is_before(&now)
    }
}
