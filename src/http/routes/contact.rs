use crate::domain::model::ContactMessage;
use crate::http::AppContext;
use crate::utils::error::StorefrontError;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use super::{admin_authorized, request_meta};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub topic: String,
    pub message: String,
    pub source: String,
}

pub async fn submit(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Json(payload): Json<ContactPayload>,
) -> Result<Json<Value>, StorefrontError> {
    let name = payload.name.trim().to_string();
    let email = payload.email.trim().to_string();
    let message = payload.message.trim().to_string();
    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(StorefrontError::Validation {
            message: "Missing required fields (name, email, message)".to_string(),
        });
    }

    let topic = {
        let t = payload.topic.trim();
        if t.is_empty() { "General" } else { t }.to_string()
    };
    let source = if payload.source.is_empty() {
        "contact-form".to_string()
    } else {
        payload.source
    };

    let entry = ContactMessage {
        name,
        email,
        phone: payload.phone.trim().to_string(),
        topic,
        message,
        source,
        created_at: Utc::now(),
        meta: request_meta(&headers),
    };

    ctx.contacts.append(entry.clone()).await?;
    ctx.notifier.contact_received(&entry).await;

    Ok(Json(json!({ "success": true })))
}

pub async fn list(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StorefrontError> {
    if !admin_authorized(&ctx.config.admin.api_token, "x-admin-token", &headers, &params) {
        return Err(StorefrontError::Unauthorized);
    }

    let limit = params.get("limit").and_then(|s| s.parse::<usize>().ok());
    let messages = ctx.contacts.recent(limit).await?;

    Ok(Json(json!({
        "count": messages.len(),
        "messages": messages,
    })))
}
