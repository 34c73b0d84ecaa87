use crate::core::{VerifyOutcome, WebhookOutcome};
use crate::domain::model::{Customer, OrderSubmission};
use crate::domain::money;
use crate::domain::ports::{InitOutcome, InitPaymentRequest, PaymentChannel};
use crate::http::AppContext;
use crate::utils::error::StorefrontError;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitPayload {
    pub order_id: String,
    pub customer: Customer,
    #[serde(deserialize_with = "crate::domain::model::de_stringly")]
    pub total: String,
    pub payment_method: String,
}

pub async fn init(
    State(ctx): State<Arc<AppContext>>,
    Json(payload): Json<InitPayload>,
) -> Result<(StatusCode, Json<Value>), StorefrontError> {
    let amount_minor = money::parse_amount_minor(&payload.total);
    if amount_minor <= 0 {
        return Err(StorefrontError::Validation {
            message: "Invalid amount".to_string(),
        });
    }

    let channel = PaymentChannel::from_method(&payload.payment_method);
    let phone = match channel {
        PaymentChannel::MobileMoney if !payload.customer.phone.is_empty() => {
            Some(payload.customer.phone.clone())
        }
        _ => None,
    };
    let request = InitPaymentRequest {
        email: payload.customer.email.clone(),
        amount_minor,
        currency: ctx.config.store.currency_code.clone(),
        order_id: payload.order_id.clone(),
        customer_name: payload.customer.name.clone(),
        channel,
        phone,
    };

    match ctx.checkout.init_payment(&request).await? {
        InitOutcome::Accepted(raw) => Ok((StatusCode::OK, Json(json!({ "ok": true, "init": raw })))),
        InitOutcome::Declined(raw) => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "raw": raw })),
        )),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyPayload {
    pub reference: String,
    #[serde(rename = "ref")]
    pub reference_alias: String,
    pub order: OrderSubmission,
}

pub async fn verify(
    State(ctx): State<Arc<AppContext>>,
    Json(payload): Json<VerifyPayload>,
) -> Result<(StatusCode, Json<Value>), StorefrontError> {
    let reference = if payload.reference.is_empty() {
        payload.reference_alias.clone()
    } else {
        payload.reference.clone()
    };
    if reference.is_empty() {
        return Err(StorefrontError::Validation {
            message: "Missing payment reference".to_string(),
        });
    }

    match ctx.checkout.verify_and_record(&reference, payload.order).await? {
        VerifyOutcome::Verified { reference } => Ok((
            StatusCode::OK,
            Json(json!({ "ok": true, "verified": true, "reference": reference })),
        )),
        VerifyOutcome::Declined { reason } => Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "verified": false, "reason": reason })),
        )),
    }
}

pub async fn webhook(
    State(ctx): State<Arc<AppContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, StorefrontError> {
    let signature = headers
        .get("x-paystack-signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match ctx.checkout.handle_webhook(&body, signature).await? {
        WebhookOutcome::Ignored => Ok("ignored"),
        WebhookOutcome::Processed {
            order_id,
            reference,
        } => {
            tracing::info!("webhook recorded order {} (ref {})", order_id, reference);
            Ok("ok")
        }
    }
}
