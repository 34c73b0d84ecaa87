use crate::domain::ports::{Mailer, OutboundEmail};
use crate::utils::error::{Result, StorefrontError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

pub struct SendgridMailer {
    client: Client,
    base_url: String,
    api_key: String,
    from: String,
}

impl SendgridMailer {
    pub fn new(base_url: String, api_key: String, from: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            from,
        }
    }
}

#[async_trait]
impl Mailer for SendgridMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let to: Vec<Value> = email.to.iter().map(|a| json!({ "email": a })).collect();
        let payload = json!({
            "personalizations": [{ "to": to }],
            "from": { "email": self.from },
            "subject": email.subject,
            "content": [
                { "type": "text/plain", "value": email.text },
                { "type": "text/html", "value": email.html },
            ],
        });

        let url = format!("{}/v3/mail/send", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorefrontError::Notification {
                message: format!("email provider returned {}: {}", status, body),
            });
        }
        Ok(())
    }
}
