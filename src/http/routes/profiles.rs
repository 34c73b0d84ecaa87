use crate::domain::model::Profile;
use crate::http::AppContext;
use crate::utils::error::StorefrontError;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use super::request_meta;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfilePayload {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub cart: Value,
}

/// The cart snapshot arrives either as an object or as a JSON-encoded
/// string; anything else collapses to an empty object.
fn coerce_cart(value: Value) -> Value {
    match value {
        Value::Object(_) => value,
        Value::String(s) => serde_json::from_str(&s).unwrap_or_else(|_| json!({})),
        _ => json!({}),
    }
}

pub async fn save(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(payload): Json<ProfilePayload>,
) -> Result<Json<Value>, StorefrontError> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() {
        return Err(StorefrontError::Validation {
            message: "Email is required".to_string(),
        });
    }

    let entry = Profile {
        email,
        name: payload.name.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        address: payload.address.trim().to_string(),
        cart_snapshot: coerce_cart(payload.cart),
        login_at: Utc::now(),
        meta: request_meta(&headers),
    };

    ctx.profiles.append(entry).await?;
    Ok(Json(json!({ "success": true })))
}
