//! PostgreSQL implementation of SubscriptionRepository.

use crate::domain::billing::{BillingCycle, Subscription, SubscriptionStatus, TxRef};
use crate::domain::foundation::{DomainError, SubscriptionId, Timestamp, UserId};
use crate::ports::SubscriptionRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the SubscriptionRepository port.
///
/// The unique index on `tx_ref` backs the idempotent upsert.
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    /// Creates a new PostgresSubscriptionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    user_id: String,
    tx_ref: String,
    amount: i64,
    currency: String,
    billing_cycle: String,
    status: String,
    provider: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id)
            .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?;
        let tx_ref = TxRef::new(row.tx_ref)
            .map_err(|e| DomainError::database(format!("Invalid tx_ref: {}", e)))?;
        let billing_cycle: BillingCycle = row
            .billing_cycle
            .parse()
            .map_err(|_| {
                DomainError::database(format!("Invalid billing_cycle: {}", row.billing_cycle))
            })?;

        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            user_id,
            tx_ref,
            amount: row.amount,
            currency: row.currency,
            billing_cycle,
            status: SubscriptionStatus::parse(&row.status),
            provider: row.provider,
            created_at: Timestamp::from_datetime(row.created_at),
            expires_at: Timestamp::from_datetime(row.expires_at),
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, user_id, tx_ref, amount, currency, billing_cycle, status, provider, created_at, expires_at";

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn find_for_user(&self, user_id: &UserId) -> Result<Vec<Subscription>, DomainError> {
        let rows: Vec<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM subscriptions WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find subscriptions: {}", e)))?;

        rows.into_iter().map(Subscription::try_from).collect()
    }

    async fn find_by_tx_ref(&self, tx_ref: &TxRef) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "SELECT {} FROM subscriptions WHERE tx_ref = $1",
            SELECT_COLUMNS
        ))
        .bind(tx_ref.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find subscription: {}", e)))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn upsert_by_tx_ref(&self, subscription: &Subscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, user_id, tx_ref, amount, currency, billing_cycle, status,
                provider, created_at, expires_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (tx_ref) DO UPDATE SET
                amount = EXCLUDED.amount,
                currency = EXCLUDED.currency,
                billing_cycle = EXCLUDED.billing_cycle,
                status = EXCLUDED.status,
                expires_at = EXCLUDED.expires_at
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.user_id.as_str())
        .bind(subscription.tx_ref.as_str())
        .bind(subscription.amount)
        .bind(&subscription.currency)
        .bind(subscription.billing_cycle.as_str())
        .bind(subscription.status.as_str())
        .bind(&subscription.provider)
        .bind(subscription.created_at.as_datetime())
        .bind(subscription.expires_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to upsert subscription: {}", e)))?;

        Ok(())
    }

    async fn update_status_by_tx_ref(
        &self,
        tx_ref: &TxRef,
        status: SubscriptionStatus,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE subscriptions SET status = $2 WHERE tx_ref = $1")
            .bind(tx_ref.as_str())
            .bind(status.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::database(format!("Failed to update subscription status: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}
