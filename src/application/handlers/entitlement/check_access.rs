//! CheckAccessHandler - Query handler for the access decision.

use std::sync::Arc;

use crate::domain::entitlement::{AccessStatus, EntitlementError};
use crate::domain::foundation::{Timestamp, UserId};
use crate::ports::{InviteGrantRepository, SubscriptionRepository};

/// Query to evaluate a user's access.
#[derive(Debug, Clone)]
pub struct CheckAccessQuery {
    pub user_id: UserId,
}

/// Handler for the access decision.
///
/// Gates every dashboard request, so it only reads; the decision itself is
/// the pure [`AccessStatus::evaluate`].
pub struct CheckAccessHandler {
    subscriptions: Arc<dyn SubscriptionRepository>,
    grants: Arc<dyn InviteGrantRepository>,
}

impl CheckAccessHandler {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        grants: Arc<dyn InviteGrantRepository>,
    ) -> Self {
        Self {
            subscriptions,
            grants,
        }
    }

    pub async fn handle(&self, query: CheckAccessQuery) -> Result<AccessStatus, EntitlementError> {
        let subscriptions = self.subscriptions.find_for_user(&query.user_id).await?;
        let grant = self.grants.find_active_for_user(&query.user_id).await?;

        Ok(AccessStatus::evaluate(subscriptions, grant, Timestamp::now()))
    }
}
