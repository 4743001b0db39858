//! Resend email adapter.
//!
//! Implements the `Mailer` port against the Resend API
//! (`POST /emails`). Delivery failures surface as `MailerError`;
//! callers treat them as advisory.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::config::EmailConfig;
use crate::ports::{Mailer, MailerError, PaymentConfirmation};

/// Request timeout for mail provider calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resend implementation of the Mailer port.
pub struct ResendMailer {
    api_key: SecretString,
    from_header: String,
    api_base_url: String,
    http_client: reqwest::Client,
}

/// Body for `POST /emails`.
#[derive(Debug, Serialize)]
struct SendEmailRequest {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

impl ResendMailer {
    /// Create a new Resend mailer from email configuration.
    pub fn new(config: &EmailConfig) -> Self {
        Self {
            api_key: config.resend_api_key.clone(),
            from_header: config.from_header(),
            api_base_url: "https://api.resend.com".to_string(),
            http_client: reqwest::Client::new(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    fn render_confirmation(message: &PaymentConfirmation) -> (String, String) {
        let greeting = message
            .to_name
            .as_deref()
            .map(|name| format!("Hi {},", name))
            .unwrap_or_else(|| "Hi,".to_string());
        let subject = "Your InferCircle subscription is active".to_string();
        let html = format!(
            "<p>{}</p>\
             <p>Your payment of {} {} was received and your {} subscription \
             to the InferCircle TGE dashboard is now active.</p>\
             <p>The InferCircle team</p>",
            greeting, message.amount, message.currency, message.billing_cycle
        );
        (subject, html)
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send_payment_confirmation(
        &self,
        message: &PaymentConfirmation,
    ) -> Result<(), MailerError> {
        let (subject, html) = Self::render_confirmation(message);
        let body = SendEmailRequest {
            from: self.from_header.clone(),
            to: vec![message.to_email.clone()],
            subject,
            html,
        };

        let response = self
            .http_client
            .post(format!("{}/emails", self.api_base_url))
            .timeout(REQUEST_TIMEOUT)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %text, "Mail provider rejected message");
            return Err(MailerError::Rejected(format!("HTTP {}", status)));
        }

        Ok(())
    }
}
