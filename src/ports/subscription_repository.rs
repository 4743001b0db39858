//! Subscription repository port.

use crate::domain::billing::{Subscription, SubscriptionStatus, TxRef};
use crate::domain::foundation::{DomainError, UserId};
use async_trait::async_trait;

/// Repository port for subscription records.
///
/// `tx_ref` is the idempotency key: every reconciliation path converges on
/// the same row for the same payment attempt.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// All subscription records for a user.
    ///
    /// Expiry and status filtering happen in the domain, not here.
    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError>;

    /// Find a record by transaction reference.
    ///
    /// Returns `None` if not found.
    async fn find_by_tx_ref(&self, tx_ref: &TxRef) -> Result<Option<Subscription>, DomainError>;

    /// Insert the record, or overwrite the mutable fields when a row with
    /// the same `tx_ref` already exists.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert_by_tx_ref(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Update only the status of the record with this `tx_ref`.
    ///
    /// Returns `false` when no such record exists.
    async fn update_status_by_tx_ref(
        &self,
        tx_ref: &TxRef,
        status: SubscriptionStatus,
    ) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn subscription_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn SubscriptionRepository) {}
    }
}
