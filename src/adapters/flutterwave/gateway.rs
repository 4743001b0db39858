//! Flutterwave payment gateway adapter.
//!
//! Implements the `PaymentGateway` trait against the Flutterwave v3 API:
//! hosted checkout via `POST /v3/payments` and reconciliation via
//! `GET /v3/transactions/verify_by_reference`.
//!
//! # Security
//!
//! - API key handled via `secrecy::SecretString`
//! - Webhook signatures are verified by the domain
//!   `PaymentWebhookVerifier`, not here

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::billing::TxRef;
use crate::ports::{
    ConfirmedPayment, GatewayError, HostedSession, HostedSessionRequest, PaymentGateway,
    VerifyOutcome,
};

use super::types::{
    CreatePaymentRequest, CreatePaymentResponse, PaymentCustomer, PaymentCustomizations,
    PaymentMeta, VerifyResponse,
};

/// Request timeout for gateway calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Flutterwave API configuration.
#[derive(Clone)]
pub struct FlutterwaveConfig {
    /// Flutterwave secret key (FLWSECK-...).
    secret_key: SecretString,

    /// Base URL for the Flutterwave API (default: https://api.flutterwave.com).
    api_base_url: String,
}

impl FlutterwaveConfig {
    /// Create a new Flutterwave configuration.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            api_base_url: "https://api.flutterwave.com".to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Flutterwave payment gateway adapter.
pub struct FlutterwaveGateway {
    config: FlutterwaveConfig,
    http_client: reqwest::Client,
}

impl FlutterwaveGateway {
    /// Create a new Flutterwave adapter with the given configuration.
    pub fn new(config: FlutterwaveConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.config.secret_key.expose_secret())
    }
}

#[async_trait]
impl PaymentGateway for FlutterwaveGateway {
    fn provider_name(&self) -> &'static str {
        "flutterwave"
    }

    async fn create_hosted_session(
        &self,
        request: &HostedSessionRequest,
    ) -> Result<HostedSession, GatewayError> {
        let body = CreatePaymentRequest {
            tx_ref: request.tx_ref.as_str().to_string(),
            amount: request.amount,
            currency: request.currency.clone(),
            redirect_url: request.redirect_url.clone(),
            customer: PaymentCustomer {
                email: request.customer_email.clone(),
                name: request.customer_name.clone(),
            },
            customizations: PaymentCustomizations {
                title: "InferCircle Subscription".to_string(),
                description: format!("{} dashboard access", request.billing_cycle),
            },
            meta: PaymentMeta {
                user_id: Some(request.user_id.to_string()),
                billing_cycle: Some(request.billing_cycle.as_str().to_string()),
            },
        };

        let response = self
            .http_client
            .post(format!("{}/v3/payments", self.config.api_base_url))
            .timeout(REQUEST_TIMEOUT)
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::retryable("network_error", e.to_string()))?;

        let http_status = response.status();
        if !http_status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %http_status, body = %text, "Payment creation rejected");
            return Err(if http_status.is_server_error() {
                GatewayError::retryable("api_error", format!("HTTP {}", http_status))
            } else {
                GatewayError::new("api_error", format!("HTTP {}", http_status))
            });
        }

        let parsed: CreatePaymentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::new("protocol_error", e.to_string()))?;

        if parsed.status != "success" {
            return Err(GatewayError::new(
                "api_error",
                parsed
                    .message
                    .unwrap_or_else(|| "Payment initialization rejected".to_string()),
            ));
        }

        let data = parsed
            .data
            .ok_or_else(|| GatewayError::new("protocol_error", "missing payment link"))?;

        Ok(HostedSession {
            payment_url: data.link,
        })
    }

    async fn verify_by_reference(&self, tx_ref: &TxRef) -> Result<VerifyOutcome, GatewayError> {
        let response = self
            .http_client
            .get(format!(
                "{}/v3/transactions/verify_by_reference",
                self.config.api_base_url
            ))
            .timeout(REQUEST_TIMEOUT)
            .query(&[("tx_ref", tx_ref.as_str())])
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| GatewayError::retryable("network_error", e.to_string()))?;

        let http_status = response.status();
        if !http_status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = %http_status, body = %text, "Verification request rejected");
            return Err(if http_status.is_server_error() {
                GatewayError::retryable("api_error", format!("HTTP {}", http_status))
            } else {
                GatewayError::new("api_error", format!("HTTP {}", http_status))
            });
        }

        let parsed: VerifyResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::new("protocol_error", e.to_string()))?;

        // Confirmed only when the envelope and the transaction both agree.
        let confirmed = parsed.status == "success"
            && parsed
                .data
                .as_ref()
                .map(|d| d.status == "successful")
                .unwrap_or(false);
        if !confirmed {
            tracing::debug!(
                tx_ref = %tx_ref,
                envelope_status = %parsed.status,
                "Transaction not confirmed yet"
            );
            return Ok(VerifyOutcome::Pending);
        }

        // Checked non-None above.
        let data = parsed
            .data
            .ok_or_else(|| GatewayError::new("protocol_error", "missing transaction data"))?;

        let meta = data.meta;
        Ok(VerifyOutcome::Confirmed(ConfirmedPayment {
            tx_ref: TxRef::new(data.tx_ref)
                .map_err(|e| GatewayError::new("protocol_error", e.to_string()))?,
            amount: data.amount.round() as i64,
            currency: data.currency,
            billing_cycle: meta
                .as_ref()
                .and_then(|m| m.billing_cycle.as_deref())
                .and_then(|c| c.parse().ok()),
            user_id: meta.as_ref().and_then(|m| m.user_id.clone()),
            customer_email: data.customer.as_ref().and_then(|c| c.email.clone()),
            customer_name: data.customer.as_ref().and_then(|c| c.name.clone()),
        }))
    }
}
