use crate::core::auth::verify_admin_credentials;
use crate::http::AppContext;
use crate::utils::error::StorefrontError;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

pub async fn login(
    State(ctx): State<Arc<AppContext>>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<Value>, StorefrontError> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(StorefrontError::Validation {
            message: "Username and password are required".to_string(),
        });
    }

    let admin = &ctx.config.admin;
    if admin.username.is_empty() || admin.password_sha256.is_empty() {
        return Err(StorefrontError::Config {
            message: "Admin credentials not configured".to_string(),
        });
    }

    if !verify_admin_credentials(admin, &payload.username, &payload.password) {
        return Err(StorefrontError::Unauthorized);
    }

    let token = if admin.api_token.is_empty() {
        Value::Null
    } else {
        Value::String(admin.api_token.clone())
    };
    Ok(Json(json!({
        "success": true,
        "token": token,
        "redirect": "admin/messages.html",
    })))
}
