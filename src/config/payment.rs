//! Payment configuration
//!
//! Flutterwave credentials and checkout settings. Both secrets stay
//! wrapped in `SecretString` so they are redacted from `Debug` output
//! of the loaded configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (Flutterwave)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Flutterwave secret key (FLWSECK-...)
    pub flutterwave_secret_key: SecretString,

    /// Secret hash shared with Flutterwave for webhook signatures
    pub flutterwave_webhook_secret: SecretString,

    /// Where the hosted checkout sends customers back to
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,

    /// Flutterwave API base URL, overridable for tests
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

impl PaymentConfig {
    /// Check if using a Flutterwave test key
    pub fn is_test_mode(&self) -> bool {
        self.flutterwave_secret_key.expose_secret().contains("_TEST")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.flutterwave_secret_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("FLUTTERWAVE_SECRET_KEY"));
        }
        if self.flutterwave_webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "FLUTTERWAVE_WEBHOOK_SECRET",
            ));
        }

        // Verify key prefix for safety
        if !self
            .flutterwave_secret_key
            .expose_secret()
            .starts_with("FLWSECK")
        {
            return Err(ValidationError::InvalidFlutterwaveKey);
        }
        if !self.redirect_url.starts_with("http://") && !self.redirect_url.starts_with("https://") {
            return Err(ValidationError::InvalidRedirectUrl);
        }

        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            flutterwave_secret_key: SecretString::new(String::new()),
            flutterwave_webhook_secret: SecretString::new(String::new()),
            redirect_url: default_redirect_url(),
            api_base_url: default_api_base_url(),
        }
    }
}

fn default_redirect_url() -> String {
    "http://localhost:5173/payment/callback".to_string()
}

fn default_api_base_url() -> String {
    "https://api.flutterwave.com".to_string()
}
