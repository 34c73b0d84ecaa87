use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accepts a string or a number and yields a display string. Order totals and
/// item prices arrive from clients in either form.
pub fn de_stringly<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn default_qty() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default = "default_qty")]
    pub qty: u32,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "de_stringly")]
    pub price: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub addr1: String,
    #[serde(default)]
    pub addr2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub zip: String,
    #[serde(default)]
    pub country: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Paid,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Processing
    }
}

impl OrderStatus {
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("paid") {
            OrderStatus::Paid
        } else {
            OrderStatus::Processing
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    #[serde(default)]
    pub customer: Customer,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, deserialize_with = "de_stringly")]
    pub subtotal: String,
    #[serde(default, deserialize_with = "de_stringly")]
    pub total: String,
    #[serde(default, deserialize_with = "de_stringly")]
    pub delivery_fee: String,
    #[serde(default)]
    pub payment_ref: String,
    #[serde(default)]
    pub payment_channel: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub source: String,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

/// Metadata captured at request time, stored alongside contact messages
/// and profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMeta {
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub referer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub topic: String,
    pub message: String,
    #[serde(default)]
    pub source: String,
    #[serde(default = "chrono::Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub meta: RequestMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub cart_snapshot: Value,
    #[serde(default = "chrono::Utc::now")]
    pub login_at: DateTime<Utc>,
    #[serde(default)]
    pub meta: RequestMeta,
}

/// Client-supplied order payload, shared by the direct order endpoint and
/// the client-initiated payment verification endpoint. `delivery` is the
/// legacy alias older clients send instead of `deliveryFee`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderSubmission {
    pub order_id: String,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
    #[serde(deserialize_with = "de_stringly")]
    pub subtotal: String,
    #[serde(deserialize_with = "de_stringly")]
    pub total: String,
    #[serde(deserialize_with = "de_stringly")]
    pub delivery_fee: String,
    #[serde(deserialize_with = "de_stringly")]
    pub delivery: String,
    pub payment_ref: String,
    pub payment_channel: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderSubmission {
    pub fn effective_delivery_fee(&self) -> String {
        if !self.delivery_fee.is_empty() {
            self.delivery_fee.clone()
        } else {
            self.delivery.clone()
        }
    }

    pub fn into_order(self, source: &str) -> Order {
        let delivery_fee = self.effective_delivery_fee();
        Order {
            order_id: self.order_id,
            customer: self.customer,
            items: self.items,
            subtotal: self.subtotal,
            total: self.total,
            delivery_fee,
            payment_ref: self.payment_ref,
            payment_channel: self.payment_channel,
            status: OrderStatus::from_label(&self.status),
            source: source.to_string(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
            updated_at: None,
            raw: None,
        }
    }
}
