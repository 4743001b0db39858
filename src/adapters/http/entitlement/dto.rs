//! HTTP DTOs for entitlement endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::entitlement::RedeemInviteCodeResult;
use crate::domain::entitlement::{AccessStatus, InviteCode};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to redeem an invite code.
#[derive(Debug, Clone, Deserialize)]
pub struct RedeemInviteCodeRequest {
    pub code: String,
}

/// Query string for the access status endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessStatusQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Invite code view for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct InviteCodeResponse {
    pub id: String,
    pub code: String,
    pub created_by: String,
    pub redeemed_by: Option<String>,
    pub redeemed_at: Option<String>,
    pub expires_at: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<InviteCode> for InviteCodeResponse {
    fn from(code: InviteCode) -> Self {
        Self {
            id: code.id.to_string(),
            code: code.code,
            created_by: code.created_by.to_string(),
            redeemed_by: code.redeemed_by.map(|u| u.to_string()),
            redeemed_at: code.redeemed_at.map(|t| t.as_datetime().to_rfc3339()),
            expires_at: code.expires_at.as_datetime().to_rfc3339(),
            is_active: code.is_active,
            created_at: code.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for invite code generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateInviteCodeResponse {
    pub success: bool,
    pub invite_code: InviteCodeResponse,
}

/// Response for the admin invite code listing.
#[derive(Debug, Clone, Serialize)]
pub struct ListInviteCodesResponse {
    pub invite_codes: Vec<InviteCodeResponse>,
}

/// Response for a successful redemption.
#[derive(Debug, Clone, Serialize)]
pub struct RedeemInviteCodeResponse {
    pub success: bool,
    /// When the granted access lapses (ISO 8601).
    pub access_expires_at: String,
}

impl From<RedeemInviteCodeResult> for RedeemInviteCodeResponse {
    fn from(result: RedeemInviteCodeResult) -> Self {
        Self {
            success: true,
            access_expires_at: result.access_expires_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Response for the access decision.
#[derive(Debug, Clone, Serialize)]
pub struct AccessStatusResponse {
    pub has_access: bool,
    pub active_monthly: bool,
    pub active_six_months: bool,
    pub has_invite_access: bool,
}

impl From<AccessStatus> for AccessStatusResponse {
    fn from(status: AccessStatus) -> Self {
        Self {
            has_access: status.has_access,
            active_monthly: status.active_monthly,
            active_six_months: status.active_six_months,
            has_invite_access: status.has_invite_access,
        }
    }
}
