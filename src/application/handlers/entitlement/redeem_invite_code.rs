//! RedeemInviteCodeHandler - Turns a valid code into a temporary grant.

use std::sync::Arc;

use crate::domain::entitlement::{EntitlementError, InviteAccessGrant};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{InviteCodeRepository, InviteGrantRepository};

/// Command to redeem an invite code.
#[derive(Debug, Clone)]
pub struct RedeemInviteCodeCommand {
    pub user_id: UserId,
    pub code: String,
}

/// Result of a successful redemption.
#[derive(Debug, Clone)]
pub struct RedeemInviteCodeResult {
    pub access_expires_at: Timestamp,
}

/// Handler for invite code redemption.
///
/// Checks run in a fixed order: an existing grant is reported before any
/// code validity problem. The claim itself is a single conditional write,
/// so two concurrent redeemers of the same code cannot both succeed.
pub struct RedeemInviteCodeHandler {
    codes: Arc<dyn InviteCodeRepository>,
    grants: Arc<dyn InviteGrantRepository>,
}

impl RedeemInviteCodeHandler {
    pub fn new(
        codes: Arc<dyn InviteCodeRepository>,
        grants: Arc<dyn InviteGrantRepository>,
    ) -> Self {
        Self { codes, grants }
    }

    pub async fn handle(
        &self,
        command: RedeemInviteCodeCommand,
    ) -> Result<RedeemInviteCodeResult, EntitlementError> {
        let now = Timestamp::now();

        if let Some(existing) = self.grants.find_active_for_user(&command.user_id).await? {
            if existing.is_valid_at(now) {
                return Err(EntitlementError::already_has_invite_access(
                    existing.expires_at,
                ));
            }
        }

        let normalized = command.code.trim().to_uppercase();
        let code = match self.codes.find_by_code(&normalized).await? {
            Some(code) if code.is_active => code,
            _ => return Err(EntitlementError::InviteCodeNotFound),
        };

        if code.is_redeemed() {
            return Err(EntitlementError::InviteCodeAlreadyUsed);
        }
        if code.is_expired_at(now) {
            return Err(EntitlementError::InviteCodeExpired);
        }

        // Conditional write; losing the race reads as "already used".
        let claimed = self.codes.claim(&code.id, &command.user_id, now).await?;
        if !claimed {
            return Err(EntitlementError::InviteCodeAlreadyUsed);
        }

        let grant = InviteAccessGrant::issue(command.user_id, code.id, now);
        self.grants.save(&grant).await?;

        Ok(RedeemInviteCodeResult {
            access_expires_at: grant.expires_at,
        })
    }
}
