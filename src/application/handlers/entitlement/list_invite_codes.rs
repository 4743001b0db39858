//! ListInviteCodesHandler - Admin listing of issued codes.

use std::sync::Arc;

use crate::domain::entitlement::{EntitlementError, InviteCode};
use crate::ports::InviteCodeRepository;

/// Query for the admin code listing.
#[derive(Debug, Clone)]
pub struct ListInviteCodesQuery {
    pub requester_email: String,
}

/// Handler for listing invite codes, newest first.
pub struct ListInviteCodesHandler {
    codes: Arc<dyn InviteCodeRepository>,
    admin_emails: Vec<String>,
}

impl ListInviteCodesHandler {
    pub fn new(codes: Arc<dyn InviteCodeRepository>, admin_emails: Vec<String>) -> Self {
        Self {
            codes,
            admin_emails: admin_emails.into_iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    pub async fn handle(
        &self,
        query: ListInviteCodesQuery,
    ) -> Result<Vec<InviteCode>, EntitlementError> {
        let email = query.requester_email.to_lowercase();
        if !self.admin_emails.iter().any(|admin| admin == &email) {
            return Err(EntitlementError::not_authorized(query.requester_email));
        }

        Ok(self.codes.list_newest_first().await?)
    }
}
