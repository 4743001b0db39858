//! GenerateInviteCodeHandler - Admin-gated invite code issuance.

use std::sync::Arc;

use rand::thread_rng;

use crate::domain::entitlement::{EntitlementError, InviteCode};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::InviteCodeRepository;

/// Uniqueness retry budget for candidate codes.
const MAX_GENERATION_ATTEMPTS: u32 = 10;

/// Command to issue a new invite code.
#[derive(Debug, Clone)]
pub struct GenerateInviteCodeCommand {
    pub requester_id: UserId,
    pub requester_email: String,
}

/// Handler for invite code issuance.
///
/// Only emails on the admin allow-list may issue codes. Candidate codes
/// are drawn until one is unused, bounded by a small retry budget.
pub struct GenerateInviteCodeHandler {
    codes: Arc<dyn InviteCodeRepository>,
    admin_emails: Vec<String>,
}

impl GenerateInviteCodeHandler {
    /// `admin_emails` are normalized to lowercase once, here.
    pub fn new(codes: Arc<dyn InviteCodeRepository>, admin_emails: Vec<String>) -> Self {
        Self {
            codes,
            admin_emails: admin_emails.into_iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    fn is_admin(&self, email: &str) -> bool {
        let email = email.to_lowercase();
        self.admin_emails.iter().any(|admin| admin == &email)
    }

    pub async fn handle(
        &self,
        command: GenerateInviteCodeCommand,
    ) -> Result<InviteCode, EntitlementError> {
        if !self.is_admin(&command.requester_email) {
            return Err(EntitlementError::not_authorized(command.requester_email));
        }

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let candidate = InviteCode::generate_candidate(&mut thread_rng());
            if self.codes.code_exists(&candidate).await? {
                continue;
            }

            let code = InviteCode::issue(candidate, command.requester_id.clone(), Timestamp::now())?;
            self.codes.save(&code).await?;
            return Ok(code);
        }

        Err(EntitlementError::generation_failed(MAX_GENERATION_ATTEMPTS))
    }
}
