//! Subscription aggregate and billing cycle rules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{SubscriptionId, Timestamp, UserId, ValidationError};

use super::tx_ref::TxRef;

/// Paid billing cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    Monthly,
    SixMonths,
}

impl BillingCycle {
    /// Days of access granted by one paid period.
    pub fn expiry_days(&self) -> i64 {
        match self {
            BillingCycle::Monthly => 30,
            BillingCycle::SixMonths => 183,
        }
    }

    /// Canonical string form, matching the wire and storage format.
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingCycle::Monthly => "monthly",
            BillingCycle::SixMonths => "six_months",
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BillingCycle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(BillingCycle::Monthly),
            "six_months" => Ok(BillingCycle::SixMonths),
            other => Err(ValidationError::invalid_format(
                "billing_cycle",
                format!("unknown cycle '{}'", other),
            )),
        }
    }
}

/// Subscription lifecycle status.
///
/// `Active` is the only status that grants access. Anything the payment
/// provider reports that we do not model explicitly is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Active,
    Pending,
    Cancelled,
    Other(String),
}

impl SubscriptionStatus {
    /// Parses a provider-reported status, preserving unknown values.
    pub fn parse(s: &str) -> Self {
        match s {
            "active" => SubscriptionStatus::Active,
            "pending" => SubscriptionStatus::Pending,
            "cancelled" => SubscriptionStatus::Cancelled,
            other => SubscriptionStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Other(s) => s.as_str(),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A paid subscription record, idempotently keyed by its transaction
/// reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub tx_ref: TxRef,
    pub amount: i64,
    pub currency: String,
    pub billing_cycle: BillingCycle,
    pub status: SubscriptionStatus,
    pub provider: String,
    pub created_at: Timestamp,
    pub expires_at: Timestamp,
}

impl Subscription {
    /// Creates an active subscription from a confirmed payment.
    ///
    /// Expiry is derived from the billing cycle relative to `now`.
    #[allow(clippy::too_many_arguments)]
    pub fn activate(
        user_id: UserId,
        tx_ref: TxRef,
        amount: i64,
        currency: impl Into<String>,
        billing_cycle: BillingCycle,
        provider: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        Self {
            id: SubscriptionId::new(),
            user_id,
            tx_ref,
            amount,
            currency: currency.into(),
            billing_cycle,
            status: SubscriptionStatus::Active,
            provider: provider.into(),
            created_at: now,
            expires_at: now.add_days(billing_cycle.expiry_days()),
        }
    }

    /// Whether this subscription grants access at the given instant.
    ///
    /// The expiry bound is inclusive: a subscription expiring exactly at
    /// `now` still grants access.
    pub fn grants_access_at(&self, now: Timestamp) -> bool {
        self.status.is_active() && !self.expires_at.is_before(&now)
    }
}
