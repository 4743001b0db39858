//! PostgreSQL implementation of InviteCodeRepository.

use crate::domain::entitlement::InviteCode;
use crate::domain::foundation::{
    DomainError, ErrorCode, InviteCodeId, Timestamp, UserId,
};
use crate::ports::InviteCodeRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the InviteCodeRepository port.
pub struct PostgresInviteCodeRepository {
    pool: PgPool,
}

impl PostgresInviteCodeRepository {
    /// Creates a new PostgresInviteCodeRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an invite code.
#[derive(Debug, sqlx::FromRow)]
struct InviteCodeRow {
    id: Uuid,
    code: String,
    created_by: String,
    redeemed_by: Option<String>,
    redeemed_at: Option<DateTime<Utc>>,
    expires_at: DateTime<Utc>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<InviteCodeRow> for InviteCode {
    type Error = DomainError;

    fn try_from(row: InviteCodeRow) -> Result<Self, Self::Error> {
        let created_by = UserId::new(row.created_by)
            .map_err(|e| DomainError::database(format!("Invalid created_by: {}", e)))?;
        let redeemed_by = row
            .redeemed_by
            .map(UserId::new)
            .transpose()
            .map_err(|e| DomainError::database(format!("Invalid redeemed_by: {}", e)))?;

        Ok(InviteCode {
            id: InviteCodeId::from_uuid(row.id),
            code: row.code,
            created_by,
            redeemed_by,
            redeemed_at: row.redeemed_at.map(Timestamp::from_datetime),
            expires_at: Timestamp::from_datetime(row.expires_at),
            is_active: row.is_active,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

const SELECT_COLUMNS: &str =
    "id, code, created_by, redeemed_by, redeemed_at, expires_at, is_active, created_at";

#[async_trait]
impl InviteCodeRepository for PostgresInviteCodeRepository {
    async fn save(&self, code: &InviteCode) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO invite_codes (
                id, code, created_by, redeemed_by, redeemed_at, expires_at, is_active, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(code.id.as_uuid())
        .bind(&code.code)
        .bind(code.created_by.as_str())
        .bind(code.redeemed_by.as_ref().map(|u| u.as_str()))
        .bind(code.redeemed_at.as_ref().map(|t| *t.as_datetime()))
        .bind(code.expires_at.as_datetime())
        .bind(code.is_active)
        .bind(code.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("invite_codes_code_key") {
                    return DomainError::new(
                        ErrorCode::ValidationFailed,
                        "Invite code already exists",
                    );
                }
            }
            DomainError::database(format!("Failed to save invite code: {}", e))
        })?;

        Ok(())
    }

    async fn code_exists(&self, code: &str) -> Result<bool, DomainError> {
        let exists: Option<(bool,)> =
            sqlx::query_as("SELECT TRUE FROM invite_codes WHERE code = $1")
                .bind(code)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::database(format!("Failed to check invite code: {}", e))
                })?;

        Ok(exists.is_some())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<InviteCode>, DomainError> {
        let row: Option<InviteCodeRow> = sqlx::query_as(&format!(
            "SELECT {} FROM invite_codes WHERE code = $1",
            SELECT_COLUMNS
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find invite code: {}", e)))?;

        row.map(InviteCode::try_from).transpose()
    }

    async fn claim(
        &self,
        id: &InviteCodeId,
        redeemed_by: &UserId,
        redeemed_at: Timestamp,
    ) -> Result<bool, DomainError> {
        // Conditional write: the WHERE clause loses the race for us.
        let result = sqlx::query(
            r#"
            UPDATE invite_codes
            SET redeemed_by = $2, redeemed_at = $3
            WHERE id = $1 AND redeemed_by IS NULL AND is_active = TRUE
            "#,
        )
        .bind(id.as_uuid())
        .bind(redeemed_by.as_str())
        .bind(redeemed_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to claim invite code: {}", e)))?;

        Ok(result.rows_affected() == 1)
    }

    async fn list_newest_first(&self) -> Result<Vec<InviteCode>, DomainError> {
        let rows: Vec<InviteCodeRow> = sqlx::query_as(&format!(
            "SELECT {} FROM invite_codes ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list invite codes: {}", e)))?;

        rows.into_iter().map(InviteCode::try_from).collect()
    }
}
