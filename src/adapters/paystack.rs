use crate::domain::ports::{
    InitOutcome, InitPaymentRequest, PaymentChannel, PaymentGateway, VerifiedTransaction,
    VerifyReply,
};
use crate::utils::error::{Result, StorefrontError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// Paystack REST client. The base URL is configurable so tests can point it
/// at a local mock server.
pub struct PaystackClient {
    client: Client,
    base_url: String,
    secret_key: String,
}

impl PaystackClient {
    pub fn new(base_url: String, secret_key: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key,
        }
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.secret_key.is_empty() {
            return Err(StorefrontError::Config {
                message: "gateway secret key not configured".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for PaystackClient {
    async fn initialize(&self, request: &InitPaymentRequest) -> Result<InitOutcome> {
        self.ensure_configured()?;

        let mut payload = json!({
            "email": request.email,
            "amount": request.amount_minor,
            "currency": request.currency,
            "metadata": {
                "orderId": request.order_id,
                "customerName": request.customer_name,
            },
        });
        match request.channel {
            PaymentChannel::Card => {
                payload["channels"] = json!(["card"]);
            }
            PaymentChannel::MobileMoney => {
                payload["channels"] = json!(["mobile_money"]);
                if let Some(phone) = &request.phone {
                    if !phone.is_empty() {
                        payload["mobile_money"] = json!({ "phone": phone });
                    }
                }
            }
        }

        let url = format!("{}/transaction/initialize", self.base_url);
        tracing::debug!("initializing transaction at {}", url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(&payload)
            .send()
            .await?;

        let body: Value =
            response
                .json()
                .await
                .map_err(|e| StorefrontError::GatewayUnexpected {
                    message: format!("initialize returned non-JSON body: {}", e),
                })?;

        if body.get("status").and_then(Value::as_bool).unwrap_or(false) {
            Ok(InitOutcome::Accepted(body))
        } else {
            Ok(InitOutcome::Declined(body))
        }
    }

    async fn verify(&self, reference: &str) -> Result<VerifyReply> {
        self.ensure_configured()?;

        let encoded: String = url::form_urlencoded::byte_serialize(reference.as_bytes()).collect();
        let url = format!("{}/transaction/verify/{}", self.base_url, encoded);
        tracing::debug!("verifying transaction reference {}", reference);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await?;

        let body: Value =
            response
                .json()
                .await
                .map_err(|e| StorefrontError::GatewayUnexpected {
                    message: format!("verify returned non-JSON body: {}", e),
                })?;

        if !body.get("status").and_then(Value::as_bool).unwrap_or(false) {
            return Err(StorefrontError::GatewayUnexpected {
                message: body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("gateway envelope status was false")
                    .to_string(),
            });
        }

        let Some(data) = body.get("data").cloned() else {
            return Ok(VerifyReply::NotSuccessful {
                reason: "not successful".to_string(),
                raw: body,
            });
        };
        let tx: VerifiedTransaction = serde_json::from_value(data).unwrap_or_default();
        if tx.status == "success" {
            Ok(VerifyReply::Success(tx))
        } else {
            Ok(VerifyReply::NotSuccessful {
                reason: tx
                    .gateway_response
                    .clone()
                    .unwrap_or_else(|| "not successful".to_string()),
                raw: body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> PaystackClient {
        PaystackClient::new(server.base_url(), "sk_test_secret".to_string())
    }

    fn init_request() -> InitPaymentRequest {
        InitPaymentRequest {
            email: "shopper@example.com".to_string(),
            amount_minor: 12000,
            currency: "GHS".to_string(),
            order_id: "ORD-1".to_string(),
            customer_name: "Ama".to_string(),
            channel: PaymentChannel::Card,
            phone: None,
        }
    }

    #[tokio::test]
    async fn initialize_sends_bearer_and_card_channel() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/transaction/initialize")
                .header("authorization", "Bearer sk_test_secret")
                .json_body_partial(r#"{"amount": 12000, "channels": ["card"]}"#);
            then.status(200).json_body(serde_json::json!({
                "status": true,
                "data": {"authorization_url": "https://pay.example/abc", "reference": "ref_1"}
            }));
        });

        let outcome = client(&server).initialize(&init_request()).await.unwrap();
        mock.assert();
        assert!(matches!(outcome, InitOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn initialize_mobile_money_includes_phone() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/transaction/initialize").json_body_partial(
                r#"{"channels": ["mobile_money"], "mobile_money": {"phone": "+233200000000"}}"#,
            );
            then.status(200).json_body(serde_json::json!({"status": true, "data": {}}));
        });

        let mut request = init_request();
        request.channel = PaymentChannel::MobileMoney;
        request.phone = Some("+233200000000".to_string());
        let outcome = client(&server).initialize(&request).await.unwrap();
        mock.assert();
        assert!(matches!(outcome, InitOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn initialize_declined_envelope() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/transaction/initialize");
            then.status(400)
                .json_body(serde_json::json!({"status": false, "message": "Invalid amount"}));
        });

        let outcome = client(&server).initialize(&init_request()).await.unwrap();
        assert!(matches!(outcome, InitOutcome::Declined(_)));
    }

    #[tokio::test]
    async fn verify_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/transaction/verify/ref_42")
                .header("authorization", "Bearer sk_test_secret");
            then.status(200).json_body(serde_json::json!({
                "status": true,
                "data": {
                    "id": 99, "status": "success", "reference": "ref_42",
                    "amount": 12000, "channel": "card",
                    "gateway_response": "Successful",
                    "customer": {"email": "shopper@example.com"}
                }
            }));
        });

        let reply = client(&server).verify("ref_42").await.unwrap();
        mock.assert();
        match reply {
            VerifyReply::Success(tx) => {
                assert_eq!(tx.amount, 12000);
                assert_eq!(tx.reference, "ref_42");
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn verify_not_successful_carries_gateway_reason() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/transaction/verify/ref_bad");
            then.status(200).json_body(serde_json::json!({
                "status": true,
                "data": {"status": "failed", "gateway_response": "Declined"}
            }));
        });

        let reply = client(&server).verify("ref_bad").await.unwrap();
        match reply {
            VerifyReply::NotSuccessful { reason, .. } => assert_eq!(reason, "Declined"),
            other => panic!("expected not-successful, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn verify_envelope_false_is_unexpected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/transaction/verify/ref_x");
            then.status(200)
                .json_body(serde_json::json!({"status": false, "message": "no such transaction"}));
        });

        let err = client(&server).verify("ref_x").await.unwrap_err();
        assert!(matches!(err, StorefrontError::GatewayUnexpected { .. }));
    }

    #[tokio::test]
    async fn unconfigured_secret_is_a_config_error() {
        let server = MockServer::start();
        let client = PaystackClient::new(server.base_url(), String::new());
        let err = client.verify("ref_1").await.unwrap_err();
        assert!(matches!(err, StorefrontError::Config { .. }));
    }
}
