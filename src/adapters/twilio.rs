use crate::domain::ports::SmsSender;
use crate::utils::error::{Result, StorefrontError};
use async_trait::async_trait;
use reqwest::Client;

pub struct TwilioSms {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl TwilioSms {
    pub fn new(base_url: String, account_sid: String, auth_token: String, from: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            account_sid,
            auth_token,
            from,
        }
    }
}

#[async_trait]
impl SmsSender for TwilioSms {
    async fn send(&self, to: &str, body: &str) -> Result<()> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        );
        let params = [("From", self.from.as_str()), ("To", to), ("Body", body)];
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorefrontError::Notification {
                message: format!("sms provider returned {}: {}", status, body),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn posts_form_encoded_message() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/2010-04-01/Accounts/AC123/Messages.json")
                .body_contains("From=%2B15550001111")
                .body_contains("To=%2B233200000000");
            then.status(201).json_body(serde_json::json!({"sid": "SM1"}));
        });

        let sms = TwilioSms::new(
            server.base_url(),
            "AC123".to_string(),
            "token".to_string(),
            "+15550001111".to_string(),
        );
        sms.send("+233200000000", "Thanks! Order ORD-1 received.")
            .await
            .unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn provider_error_surfaces_as_notification_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/2010-04-01/Accounts/AC123/Messages.json");
            then.status(400).body("bad number");
        });

        let sms = TwilioSms::new(
            server.base_url(),
            "AC123".to_string(),
            "token".to_string(),
            "+15550001111".to_string(),
        );
        let err = sms.send("bogus", "hi").await.unwrap_err();
        assert!(matches!(err, StorefrontError::Notification { .. }));
    }
}
