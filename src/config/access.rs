//! Access control configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Access configuration (admin allow-list)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    /// Emails allowed to issue and list invite codes (comma-separated)
    pub admin_emails: Option<String>,
}

impl AccessConfig {
    /// Get admin emails as a vector
    pub fn admin_emails_list(&self) -> Vec<String> {
        self.admin_emails
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|e| e.trim().to_string())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate access configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for email in self.admin_emails_list() {
            if !email.contains('@') {
                return Err(ValidationError::InvalidAdminEmail(email));
            }
        }
        Ok(())
    }
}
