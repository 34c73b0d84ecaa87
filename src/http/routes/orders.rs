use crate::domain::model::{Order, OrderSubmission};
use crate::http::AppContext;
use crate::utils::error::StorefrontError;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

use super::admin_authorized;

pub async fn submit(
    State(ctx): State<Arc<AppContext>>,
    Json(payload): Json<OrderSubmission>,
) -> Result<Json<Value>, StorefrontError> {
    if payload.order_id.is_empty() || payload.customer.email.is_empty() {
        return Err(StorefrontError::Validation {
            message: "Missing required order fields (orderId, customer.email)".to_string(),
        });
    }

    let order_id = ctx.checkout.record_order(payload).await?;
    Ok(Json(json!({ "ok": true, "orderId": order_id })))
}

fn search_text(order: &Order) -> String {
    [
        order.order_id.as_str(),
        order.payment_ref.as_str(),
        order.customer.name.as_str(),
        order.customer.email.as_str(),
        order.customer.phone.as_str(),
    ]
    .iter()
    .filter(|s| !s.is_empty())
    .map(|s| *s)
    .collect::<Vec<_>>()
    .join(" ")
    .to_lowercase()
}

pub async fn list(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StorefrontError> {
    if !admin_authorized(&ctx.config.admin.api_token, "x-admin-key", &headers, &params) {
        return Err(StorefrontError::Unauthorized);
    }

    let search = params
        .get("q")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();
    let limit = params.get("limit").and_then(|s| s.parse::<usize>().ok());

    let orders = ctx.orders.all().await?;
    let total = orders.len();

    let mut sorted = orders;
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let filtered: Vec<Order> = sorted
        .into_iter()
        .filter(|o| search.is_empty() || search_text(o).contains(&search))
        .collect();
    let limited: Vec<Order> = match limit {
        Some(n) if n > 0 => filtered.into_iter().take(n).collect(),
        _ => filtered,
    };

    Ok(Json(json!({
        "ok": true,
        "count": limited.len(),
        "total": total,
        "updatedAt": Utc::now(),
        "orders": limited,
    })))
}
