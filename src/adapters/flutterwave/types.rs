//! Flutterwave API wire types.

use serde::{Deserialize, Serialize};

/// Body for `POST /v3/payments`.
#[derive(Debug, Serialize)]
pub struct CreatePaymentRequest {
    pub tx_ref: String,
    pub amount: i64,
    pub currency: String,
    pub redirect_url: String,
    pub customer: PaymentCustomer,
    pub customizations: PaymentCustomizations,
    pub meta: PaymentMeta,
}

#[derive(Debug, Serialize)]
pub struct PaymentCustomer {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentCustomizations {
    pub title: String,
    pub description: String,
}

/// Metadata echoed back through verification and webhooks.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentMeta {
    pub user_id: Option<String>,
    pub billing_cycle: Option<String>,
}

/// Response envelope for `POST /v3/payments`.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<CreatePaymentData>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePaymentData {
    pub link: String,
}

/// Response envelope for `GET /v3/transactions/verify_by_reference`.
#[derive(Debug, Deserialize)]
pub struct VerifyResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<VerifyData>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyData {
    pub status: String,
    pub tx_ref: String,
    /// Providers report decimal amounts on the wire.
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub customer: Option<VerifyCustomer>,
    #[serde(default)]
    pub meta: Option<PaymentMeta>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyCustomer {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}
