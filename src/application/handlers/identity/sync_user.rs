//! SyncUserHandler - Upserts the auth-provider profile on sign-in.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::identity::UserProfile;
use crate::ports::UserRepository;

/// Command carrying the profile reported by the auth provider.
#[derive(Debug, Clone)]
pub struct SyncUserCommand {
    pub user_id: UserId,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Handler for profile synchronization.
///
/// Runs on every sign-in; the operation is idempotent.
pub struct SyncUserHandler {
    users: Arc<dyn UserRepository>,
}

impl SyncUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, command: SyncUserCommand) -> Result<UserProfile, DomainError> {
        let profile = UserProfile::new(
            command.user_id,
            command.email,
            command.display_name,
            command.avatar_url,
            Timestamp::now(),
        )
        .map_err(|e| DomainError::validation("email", e.to_string()))?;

        self.users.upsert(&profile).await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockUserRepository {
        saved: Mutex<Vec<UserProfile>>,
        fail_write: bool,
    }

    impl MockUserRepository {
        fn new() -> Self {
            Self {
                saved: Mutex::new(vec![]),
                fail_write: false,
            }
        }

        fn failing() -> Self {
            Self {
                saved: Mutex::new(vec![]),
                fail_write: true,
            }
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn upsert(&self, profile: &UserProfile) -> Result<(), DomainError> {
            if self.fail_write {
                return Err(DomainError::database("Simulated write failure"));
            }
            self.saved.lock().unwrap().push(profile.clone());
            Ok(())
        }
    }

    fn command() -> SyncUserCommand {
        SyncUserCommand {
            user_id: UserId::new("user-1").unwrap(),
            email: "alice@example.com".to_string(),
            display_name: Some("Alice".to_string()),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn upserts_profile_on_sign_in() {
        let repo = Arc::new(MockUserRepository::new());
        let handler = SyncUserHandler::new(repo.clone());

        let profile = handler.handle(command()).await.unwrap();
        assert_eq!(profile.email, "alice@example.com");
        assert_eq!(repo.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejects_malformed_email() {
        let repo = Arc::new(MockUserRepository::new());
        let handler = SyncUserHandler::new(repo.clone());

        let mut cmd = command();
        cmd.email = "not-an-email".to_string();

        assert!(handler.handle(cmd).await.is_err());
        assert!(repo.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn propagates_store_failure() {
        let handler = SyncUserHandler::new(Arc::new(MockUserRepository::failing()));
        assert!(handler.handle(command()).await.is_err());
    }
}
