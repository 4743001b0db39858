//! Webhook signature verification for the payment provider.
//!
//! The provider signs each delivery by sending the hex HMAC-SHA256 digest
//! of the raw request body in the `verif-hash` header. Verification must
//! happen on the raw bytes before any JSON parsing, with a constant-time
//! comparison.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use super::webhook_event::WebhookEnvelope;

/// Errors from webhook verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("Missing verif-hash header")]
    MissingSignature,

    #[error("Webhook secret is not configured")]
    MissingSecret,

    #[error("Webhook signature mismatch")]
    SignatureMismatch,

    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(String),
}

/// Verifies `verif-hash` signatures and parses the envelope.
#[derive(Debug, Clone)]
pub struct PaymentWebhookVerifier {
    secret: String,
}

impl PaymentWebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self { secret: secret.into() }
    }

    /// Verifies the signature over the raw payload, then parses it.
    ///
    /// Steps:
    /// 1. Reject when no secret is configured
    /// 2. Compute the expected hex digest over the raw bytes
    /// 3. Compare against the header in constant time
    /// 4. Only then deserialize the JSON envelope
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEnvelope, WebhookError> {
        if self.secret.is_empty() {
            return Err(WebhookError::MissingSecret);
        }
        let signature = signature.trim();
        if signature.is_empty() {
            return Err(WebhookError::MissingSignature);
        }

        let expected = self.compute_signature(payload);
        if !constant_time_compare(expected.as_bytes(), signature.as_bytes()) {
            return Err(WebhookError::SignatureMismatch);
        }

        serde_json::from_slice(payload)
            .map_err(|e| WebhookError::MalformedPayload(e.to_string()))
    }

    /// Hex HMAC-SHA256 digest of the payload under the shared secret.
    fn compute_signature(&self, payload: &[u8]) -> String {
        let mut mac =
            Hmac::<Sha256>::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key");
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Compares two byte slices in constant time.
///
/// This prevents timing attacks that could leak information about the
/// expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes a valid signature for a payload. Test helper.
pub fn compute_test_signature(secret: &str, payload: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}
