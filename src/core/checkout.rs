use crate::domain::model::{Customer, Order, OrderStatus, OrderSubmission};
use crate::domain::money;
use crate::domain::ports::{
    InitOutcome, InitPaymentRequest, PaymentGateway, TransactionMetadata, VerifyReply,
};
use crate::store::OrderStore;
use crate::utils::error::{Result, StorefrontError};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

use super::notify::Notifier;
use super::webhook::{self, WebhookPayload};

pub const SOURCE_SEND_ORDER: &str = "send-order";
pub const SOURCE_VERIFY: &str = "verify-payment";
pub const SOURCE_WEBHOOK: &str = "paystack-webhook";

#[derive(Debug, Clone)]
pub enum VerifyOutcome {
    Verified { reference: String },
    Declined { reason: String },
}

#[derive(Debug, Clone)]
pub enum WebhookOutcome {
    Ignored,
    Processed { order_id: String, reference: String },
}

/// The payment and order workflow: gateway initialization, the two
/// verification paths (client-initiated and webhook), and direct order
/// intake. Both paid paths converge on an idempotent upsert keyed by the
/// payment reference.
pub struct CheckoutService {
    gateway: Arc<dyn PaymentGateway>,
    notifier: Notifier,
    orders: Arc<OrderStore>,
    webhook_secret: String,
}

impl CheckoutService {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        notifier: Notifier,
        orders: Arc<OrderStore>,
        webhook_secret: String,
    ) -> Self {
        Self {
            gateway,
            notifier,
            orders,
            webhook_secret,
        }
    }

    pub async fn init_payment(&self, request: &InitPaymentRequest) -> Result<InitOutcome> {
        self.gateway.initialize(request).await
    }

    /// Client-initiated verification: confirm the reference with the
    /// gateway, then notify and record the paid order. Persistence failures
    /// are logged, not surfaced; the payment already happened.
    pub async fn verify_and_record(
        &self,
        reference: &str,
        submission: OrderSubmission,
    ) -> Result<VerifyOutcome> {
        match self.gateway.verify(reference).await? {
            VerifyReply::NotSuccessful { reason, .. } => Ok(VerifyOutcome::Declined { reason }),
            VerifyReply::Success(tx) => {
                let mut order = submission.into_order(SOURCE_VERIFY);
                order.payment_ref = reference.to_string();
                if let Some(channel) = &tx.channel {
                    order.payment_channel = channel.clone();
                }
                order.status = OrderStatus::Paid;
                order.raw = Some(json!({
                    "paystack": {
                        "id": tx.id,
                        "status": tx.status,
                        "gateway_response": tx.gateway_response,
                    }
                }));

                self.notifier.payment_received(&order, reference).await;
                if let Err(e) = self.orders.upsert_by_reference(order).await {
                    tracing::warn!("failed to persist verified order: {}", e);
                }
                Ok(VerifyOutcome::Verified {
                    reference: reference.to_string(),
                })
            }
        }
    }

    /// Webhook path: check the HMAC signature over the raw body, ignore
    /// non-charge events, re-verify the reference with the gateway, then
    /// rebuild the order from transaction metadata and record it.
    pub async fn handle_webhook(&self, raw_body: &[u8], signature: &str) -> Result<WebhookOutcome> {
        if self.webhook_secret.is_empty() {
            return Err(StorefrontError::Config {
                message: "gateway secret key not configured".to_string(),
            });
        }
        if signature.is_empty() || !webhook::verify_signature(&self.webhook_secret, raw_body, signature)
        {
            tracing::warn!("invalid webhook signature");
            return Err(StorefrontError::InvalidSignature);
        }

        let payload: WebhookPayload = serde_json::from_slice(raw_body).unwrap_or_default();
        let reference = payload.data.reference.clone();
        if reference.is_empty() || !webhook::is_success_event(&payload.event) {
            tracing::debug!("ignoring webhook event '{}'", payload.event);
            return Ok(WebhookOutcome::Ignored);
        }

        match self.gateway.verify(&reference).await? {
            VerifyReply::NotSuccessful { reason, .. } => {
                Err(StorefrontError::GatewayRejected { message: reason })
            }
            VerifyReply::Success(tx) => {
                let meta: TransactionMetadata = tx
                    .metadata
                    .clone()
                    .map(|v| serde_json::from_value(v).unwrap_or_default())
                    .unwrap_or_default();
                let order_id = if meta.order_id.is_empty() {
                    format!("ORD-{}", Utc::now().timestamp_millis())
                } else {
                    meta.order_id.clone()
                };
                let gateway_customer = tx.customer.clone().unwrap_or_default();
                let delivery_fee = if meta.delivery_fee.is_empty() {
                    meta.delivery.clone()
                } else {
                    meta.delivery_fee.clone()
                };

                let order = Order {
                    order_id: order_id.clone(),
                    customer: Customer {
                        name: meta.customer_name.clone(),
                        email: gateway_customer.email.unwrap_or_default(),
                        phone: gateway_customer.phone.unwrap_or_default(),
                        ..Default::default()
                    },
                    items: meta.items.clone(),
                    subtotal: meta.subtotal.clone(),
                    total: money::minor_to_display(tx.amount),
                    delivery_fee,
                    payment_ref: reference.clone(),
                    payment_channel: tx.channel.clone().unwrap_or_default(),
                    status: OrderStatus::Paid,
                    source: SOURCE_WEBHOOK.to_string(),
                    created_at: meta.created_at.unwrap_or_else(Utc::now),
                    updated_at: None,
                    raw: Some(json!({
                        "webhookEvent": payload.event,
                        "paystackId": tx.id,
                    })),
                };

                self.notifier.payment_received(&order, &reference).await;
                if let Err(e) = self.orders.upsert_by_reference(order).await {
                    tracing::warn!("webhook persist failed: {}", e);
                }
                Ok(WebhookOutcome::Processed {
                    order_id,
                    reference,
                })
            }
        }
    }

    /// Direct order intake: confirmation email and SMS, then append. A
    /// persistence failure is logged but the order is still acknowledged,
    /// matching the notification-first contract of the endpoint.
    pub async fn record_order(&self, submission: OrderSubmission) -> Result<String> {
        let order = submission.into_order(SOURCE_SEND_ORDER);
        self.notifier.order_confirmation(&order).await;
        let order_id = order.order_id.clone();
        if let Err(e) = self.orders.append(order).await {
            tracing::warn!("failed to persist order locally: {}", e);
        }
        Ok(order_id)
    }
}
