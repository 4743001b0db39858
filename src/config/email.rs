//! Email configuration
//!
//! Settings for the Resend account that sends the payment confirmation
//! email. The API key stays wrapped in `SecretString` so it is redacted
//! from `Debug` output of the loaded configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Resend mailer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key (re_...)
    pub resend_api_key: SecretString,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.resend_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("RESEND_API_KEY"));
        }
        if !self.resend_api_key.expose_secret().starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: SecretString::new(String::new()),
            from_email: default_from_email(),
            from_name: default_from_name(),
        }
    }
}

fn default_from_email() -> String {
    "noreply@infercircle.com".to_string()
}

fn default_from_name() -> String {
    "InferCircle".to_string()
}
