//! PostgreSQL implementation of InviteGrantRepository.

use crate::domain::entitlement::InviteAccessGrant;
use crate::domain::foundation::{
    DomainError, InviteCodeId, InviteGrantId, Timestamp, UserId,
};
use crate::ports::InviteGrantRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the InviteGrantRepository port.
pub struct PostgresInviteGrantRepository {
    pool: PgPool,
}

impl PostgresInviteGrantRepository {
    /// Creates a new PostgresInviteGrantRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an invite access grant.
#[derive(Debug, sqlx::FromRow)]
struct InviteGrantRow {
    id: Uuid,
    user_id: String,
    invite_code_id: Uuid,
    expires_at: DateTime<Utc>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<InviteGrantRow> for InviteAccessGrant {
    type Error = DomainError;

    fn try_from(row: InviteGrantRow) -> Result<Self, Self::Error> {
        let user_id = UserId::new(row.user_id)
            .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?;

        Ok(InviteAccessGrant {
            id: InviteGrantId::from_uuid(row.id),
            user_id,
            invite_code_id: InviteCodeId::from_uuid(row.invite_code_id),
            expires_at: Timestamp::from_datetime(row.expires_at),
            is_active: row.is_active,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl InviteGrantRepository for PostgresInviteGrantRepository {
    async fn save(&self, grant: &InviteAccessGrant) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO invite_access_grants (
                id, user_id, invite_code_id, expires_at, is_active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(grant.id.as_uuid())
        .bind(grant.user_id.as_str())
        .bind(grant.invite_code_id.as_uuid())
        .bind(grant.expires_at.as_datetime())
        .bind(grant.is_active)
        .bind(grant.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save invite grant: {}", e)))?;

        Ok(())
    }

    async fn find_active_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<InviteAccessGrant>, DomainError> {
        let row: Option<InviteGrantRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, invite_code_id, expires_at, is_active, created_at
            FROM invite_access_grants
            WHERE user_id = $1 AND is_active = TRUE
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find invite grant: {}", e)))?;

        row.map(InviteAccessGrant::try_from).transpose()
    }
}
