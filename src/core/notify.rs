use crate::domain::model::{ContactMessage, Order, OrderItem};
use crate::domain::money;
use crate::domain::ports::{Mailer, OutboundEmail, SmsSender};
use std::sync::Arc;

/// Best-effort fan-out to the configured email and SMS channels. Failures
/// are logged and never bubble into the request that triggered them; an
/// unconfigured channel is skipped silently.
#[derive(Clone)]
pub struct Notifier {
    mailer: Option<Arc<dyn Mailer>>,
    sms: Option<Arc<dyn SmsSender>>,
    email_recipients: Vec<String>,
    sms_recipients: Vec<String>,
    shop_name: String,
    currency_symbol: String,
}

impl Notifier {
    pub fn new(
        mailer: Option<Arc<dyn Mailer>>,
        sms: Option<Arc<dyn SmsSender>>,
        email_recipients: Vec<String>,
        sms_recipients: Vec<String>,
        shop_name: String,
        currency_symbol: String,
    ) -> Self {
        Self {
            mailer,
            sms,
            email_recipients,
            sms_recipients,
            shop_name,
            currency_symbol,
        }
    }

    /// Configured recipients, or the fallback address when none are set.
    fn email_targets(&self, fallback: &str) -> Vec<String> {
        if !self.email_recipients.is_empty() {
            self.email_recipients.clone()
        } else if !fallback.is_empty() {
            vec![fallback.to_string()]
        } else {
            Vec::new()
        }
    }

    fn fmt(&self, amount: &str) -> String {
        money::format_amount(&self.currency_symbol, amount)
    }

    fn items_html(&self, items: &[OrderItem]) -> String {
        items
            .iter()
            .map(|i| {
                format!(
                    "<li>{} x {} - {}</li>",
                    i.qty,
                    i.title,
                    self.fmt(&i.price)
                )
            })
            .collect()
    }

    async fn send_email(&self, email: OutboundEmail) {
        let Some(mailer) = &self.mailer else {
            tracing::debug!("email channel not configured, skipping");
            return;
        };
        if email.to.is_empty() {
            tracing::debug!("no email recipients, skipping");
            return;
        }
        if let Err(e) = mailer.send(&email).await {
            tracing::warn!("email notify failed: {}", e);
        }
    }

    async fn send_sms(&self, to: &str, body: &str) {
        let Some(sms) = &self.sms else {
            tracing::debug!("sms channel not configured, skipping");
            return;
        };
        if to.is_empty() {
            return;
        }
        if let Err(e) = sms.send(to, body).await {
            tracing::warn!("sms notify failed: {}", e);
        }
    }

    pub async fn payment_received(&self, order: &Order, reference: &str) {
        let customer = &order.customer;
        let html = format!(
            "<p>Hi {},</p><p>Your payment was successful. Reference: <strong>{}</strong></p>\
             <p>Order: <strong>{}</strong></p><ul>{}</ul><p>Total: {}</p>",
            if customer.name.is_empty() { "customer" } else { &customer.name },
            reference,
            order.order_id,
            self.items_html(&order.items),
            self.fmt(&order.total),
        );
        self.send_email(OutboundEmail {
            to: self.email_targets(&customer.email),
            subject: format!("Payment received - {}", order.order_id),
            text: format!("Order {} confirmed. Ref: {}", order.order_id, reference),
            html,
        })
        .await;

        let sms_body = format!(
            "Thanks {}! Payment received for Order {}. Total: {} (Ref: {})",
            customer.name,
            order.order_id,
            self.fmt(&order.total),
            reference
        );
        self.send_sms(&customer.phone, &sms_body).await;
    }

    pub async fn order_confirmation(&self, order: &Order) {
        let customer = &order.customer;
        let payment_line = if order.payment_ref.is_empty() {
            String::new()
        } else {
            format!(
                "<p>Payment reference: <strong>{}</strong></p>",
                order.payment_ref
            )
        };
        let html = format!(
            "<p>Hi {},</p><p>Thanks for your order. Your order number is <strong>{}</strong>.</p>{}\
             <p><strong>Shipping address</strong>: {} {}, {} {}, {}</p>\
             <p><strong>Items</strong></p><ul>{}</ul>\
             <p>Subtotal: {} / Total: {}</p>\
             <p>Regards,<br/>{}</p>",
            if customer.name.is_empty() { "customer" } else { &customer.name },
            order.order_id,
            payment_line,
            customer.addr1,
            customer.addr2,
            customer.city,
            customer.zip,
            customer.country,
            self.items_html(&order.items),
            self.fmt(&order.subtotal),
            self.fmt(&order.total),
            self.shop_name,
        );
        let text_items: Vec<String> = order
            .items
            .iter()
            .map(|i| format!("{} x {}", i.qty, i.title))
            .collect();
        self.send_email(OutboundEmail {
            to: self.email_targets(&customer.email),
            subject: format!("Order confirmation - {}", order.order_id),
            text: format!(
                "Order {} confirmed. Items: {}",
                order.order_id,
                text_items.join(", ")
            ),
            html,
        })
        .await;

        let sms_body = format!(
            "Thanks {}! Order {} received. Total: {}",
            customer.name,
            order.order_id,
            self.fmt(&order.total)
        );
        self.send_sms(&customer.phone, &sms_body).await;
    }

    pub async fn contact_received(&self, message: &ContactMessage) {
        let phone_line = if message.phone.is_empty() {
            "n/a".to_string()
        } else {
            message.phone.clone()
        };
        let html_body = message
            .message
            .lines()
            .map(|line| if line.is_empty() { "&nbsp;" } else { line })
            .collect::<Vec<_>>()
            .join("<br/>");
        let html = format!(
            "<p>You have a new contact form submission.</p>\
             <p><strong>Name:</strong> {}</p>\
             <p><strong>Email:</strong> {}</p>\
             <p><strong>Phone:</strong> {}</p>\
             <p><strong>Topic:</strong> {}</p>\
             <p><strong>Message:</strong></p><div>{}</div>\
             <p>Received: {}</p>",
            message.name, message.email, phone_line, message.topic, html_body, message.created_at
        );
        let text = format!(
            "{} ({})\nTopic: {}\nMessage: {}\nReceived: {}",
            message.name, message.email, message.topic, message.message, message.created_at
        );
        self.send_email(OutboundEmail {
            to: self.email_targets(""),
            subject: format!("New contact message from {}", message.name),
            text,
            html,
        })
        .await;

        let sms_body = format!(
            "Contact: {} ({}) {}{}",
            message.name,
            message.topic,
            message.email,
            if message.phone.is_empty() {
                String::new()
            } else {
                format!(", {}", message.phone)
            }
        );
        for to in self.sms_recipients.clone() {
            self.send_sms(&to, &sms_body).await;
        }
    }
}
