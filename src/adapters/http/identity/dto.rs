//! HTTP DTOs for identity endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::identity::UserProfile;

/// Request to upsert the signed-in user's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncUserRequest {
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Profile view returned after a sync.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfileResponse {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: String,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            email: profile.email,
            display_name: profile.display_name,
            avatar_url: profile.avatar_url,
            updated_at: profile.updated_at.as_datetime().to_rfc3339(),
        }
    }
}
