//! PostgreSQL adapters - Database implementations for repository ports.

mod user_repository;
mod invite_code_repository;
mod invite_grant_repository;
mod subscription_repository;

pub use user_repository::PostgresUserRepository;
pub use invite_code_repository::PostgresInviteCodeRepository;
pub use invite_grant_repository::PostgresInviteGrantRepository;
pub use subscription_repository::PostgresSubscriptionRepository;
