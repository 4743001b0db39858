//! PostgreSQL implementation of UserRepository.

use crate::domain::foundation::DomainError;
use crate::domain::identity::UserProfile;
use crate::ports::UserRepository;
use async_trait::async_trait;
use sqlx::PgPool;

/// PostgreSQL implementation of the UserRepository port.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn upsert(&self, profile: &UserProfile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, display_name, avatar_url, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                display_name = EXCLUDED.display_name,
                avatar_url = EXCLUDED.avatar_url,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.id.as_str())
        .bind(&profile.email)
        .bind(&profile.display_name)
        .bind(&profile.avatar_url)
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to upsert user: {}", e)))?;

        Ok(())
    }
}
