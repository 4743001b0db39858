//! Access decision over subscriptions and invite grants.

use serde::Serialize;

use crate::domain::billing::{BillingCycle, Subscription};
use crate::domain::foundation::Timestamp;

use super::invite_grant::InviteAccessGrant;

/// Snapshot of a user's entitlements at a point in time.
///
/// Empty subscription lists and a missing grant are ordinary values, not
/// errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessStatus {
    pub has_access: bool,
    pub active_monthly: bool,
    pub active_six_months: bool,
    pub has_invite_access: bool,
    #[serde(skip)]
    pub subscriptions: Vec<Subscription>,
    #[serde(skip)]
    pub invite_grant: Option<InviteAccessGrant>,
}

impl AccessStatus {
    /// Pure access decision.
    ///
    /// A user has access at `now` iff an active subscription or an active
    /// invite grant has `expires_at >= now`. Both expiry bounds are
    /// inclusive.
    pub fn evaluate(
        subscriptions: Vec<Subscription>,
        invite_grant: Option<InviteAccessGrant>,
        now: Timestamp,
    ) -> Self {
        let active: Vec<Subscription> = subscriptions
            .into_iter()
            .filter(|s| s.grants_access_at(now))
            .collect();

        let active_monthly = active
            .iter()
            .any(|s| s.billing_cycle == BillingCycle::Monthly);
        let active_six_months = active
            .iter()
            .any(|s| s.billing_cycle == BillingCycle::SixMonths);

        let valid_grant = invite_grant.filter(|g| g.is_valid_at(now));
        let has_invite_access = valid_grant.is_some();

        Self {
            has_access: !active.is_empty() || has_invite_access,
            active_monthly,
            active_six_months,
            has_invite_access,
            subscriptions: active,
            invite_grant: valid_grant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::billing::{SubscriptionStatus, TxRef};
    use crate::domain::foundation::{InviteCodeId, UserId};
    use proptest::prelude::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn subscription(cycle: BillingCycle, now: Timestamp) -> Subscription {
        Subscription::activate(
            user(),
            TxRef::mint(&user(), now),
            199,
            "USD",
            cycle,
            "flutterwave",
            now,
        )
    }

    #[test]
    fn no_entitlements_means_no_access() {
        let status = AccessStatus::evaluate(vec![], None, Timestamp::now());
        assert!(!status.has_access);
        assert!(!status.active_monthly);
        assert!(!status.has_invite_access);
        assert!(status.subscriptions.is_empty());
    }

    #[test]
    fn active_monthly_subscription_grants_access() {
        let now = Timestamp::now();
        let status = AccessStatus::evaluate(
            vec![subscription(BillingCycle::Monthly, now)],
            None,
            now,
        );
        assert!(status.has_access);
        assert!(status.active_monthly);
        assert!(!status.active_six_months);
    }

    #[test]
    fn expired_subscription_does_not_grant_access() {
        let now = Timestamp::now();
        let status = AccessStatus::evaluate(
            vec![subscription(BillingCycle::Monthly, now.minus_days(31))],
            None,
            now,
        );
        assert!(!status.has_access);
        assert!(status.subscriptions.is_empty());
    }

    #[test]
    fn cancelled_subscription_does_not_grant_access() {
        let now = Timestamp::now();
        let mut sub = subscription(BillingCycle::SixMonths, now);
        sub.status = SubscriptionStatus::Cancelled;
        let status = AccessStatus::evaluate(vec![sub], None, now);
        assert!(!status.has_access);
    }

    #[test]
    fn invite_grant_alone_grants_access() {
        let now = Timestamp::now();
        let grant = InviteAccessGrant::issue(user(), InviteCodeId::new(), now);
        let status = AccessStatus::evaluate(vec![], Some(grant), now);
        assert!(status.has_access);
        assert!(status.has_invite_access);
        assert!(!status.active_monthly);
    }

    #[test]
    fn expired_invite_grant_does_not_grant_access() {
        let now = Timestamp::now();
        let grant = InviteAccessGrant::issue(user(), InviteCodeId::new(), now.minus_days(4));
        let status = AccessStatus::evaluate(vec![], Some(grant), now);
        assert!(!status.has_access);
        assert!(status.invite_grant.is_none());
    }

    #[test]
    fn both_cycles_active_sets_both_flags() {
        let now = Timestamp::now();
        let status = AccessStatus::evaluate(
            vec![
                subscription(BillingCycle::Monthly, now),
                subscription(BillingCycle::SixMonths, now),
            ],
            None,
            now,
        );
        assert!(status.active_monthly);
        assert!(status.active_six_months);
        assert_eq!(status.subscriptions.len(), 2);
    }

    proptest! {
        // Expiry exactly equal to now still grants access; one second
        // earlier does not.
        #[test]
        fn access_boundary_is_inclusive(offset_days in 0i64..400) {
            let now = Timestamp::now();
            let mut sub = subscription(BillingCycle::Monthly, now);
            sub.expires_at = now.add_days(offset_days);

            let at_expiry = AccessStatus::evaluate(vec![sub.clone()], None, sub.expires_at);
            prop_assert!(at_expiry.has_access);

            let after_expiry =
                AccessStatus::evaluate(vec![sub.clone()], None, sub.expires_at.plus_secs(1));
            prop_assert!(!after_expiry.has_access);
        }
    }
}
