use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::model::OrderItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentChannel {
    Card,
    MobileMoney,
}

impl PaymentChannel {
    pub fn from_method(method: &str) -> Self {
        if method.eq_ignore_ascii_case("momo") {
            PaymentChannel::MobileMoney
        } else {
            PaymentChannel::Card
        }
    }
}

#[derive(Debug, Clone)]
pub struct InitPaymentRequest {
    pub email: String,
    pub amount_minor: i64,
    pub currency: String,
    pub order_id: String,
    pub customer_name: String,
    pub channel: PaymentChannel,
    pub phone: Option<String>,
}

/// Gateway's answer to a transaction initialization. The raw envelope is
/// echoed back to the client either way.
#[derive(Debug, Clone)]
pub enum InitOutcome {
    Accepted(Value),
    Declined(Value),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GatewayCustomer {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// The transaction record inside a successful verification envelope.
/// Field names follow the gateway's wire format.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifiedTransaction {
    pub id: Option<i64>,
    pub status: String,
    pub reference: String,
    pub amount: i64,
    pub gateway_response: Option<String>,
    pub channel: Option<String>,
    pub customer: Option<GatewayCustomer>,
    pub metadata: Option<Value>,
}

/// Checkout metadata we attach on initialization and read back on
/// verification.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionMetadata {
    pub order_id: String,
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    #[serde(deserialize_with = "super::model::de_stringly")]
    pub subtotal: String,
    #[serde(deserialize_with = "super::model::de_stringly")]
    pub delivery_fee: String,
    #[serde(deserialize_with = "super::model::de_stringly")]
    pub delivery: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub enum VerifyReply {
    Success(VerifiedTransaction),
    NotSuccessful { reason: String, raw: Value },
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn initialize(&self, request: &InitPaymentRequest) -> Result<InitOutcome>;
    async fn verify(&self, reference: &str) -> Result<VerifyReply>;
}

#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<()>;
}
