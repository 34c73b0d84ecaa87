use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha512;

type HmacSha512 = Hmac<Sha512>;

/// Verifies the gateway's webhook signature: hex-encoded HMAC-SHA512 of the
/// raw request body under the account secret key. Comparison is constant
/// time via the MAC itself.
pub fn verify_signature(secret: &str, raw_body: &[u8], signature_hex: &str) -> bool {
    let Ok(signature) = hex::decode(signature_hex.trim()) else {
        return false;
    };
    let Ok(mut mac) = HmacSha512::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(raw_body);
    mac.verify_slice(&signature).is_ok()
}

/// Computes the hex signature for a body; used when emitting test webhooks.
pub fn sign(secret: &str, raw_body: &[u8]) -> String {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts any key length"));
    mac.update(raw_body);
    hex::encode(mac.finalize().into_bytes())
}

/// Events that mark a completed charge; anything else is acknowledged and
/// ignored.
pub fn is_success_event(event: &str) -> bool {
    let event = event.to_ascii_lowercase();
    event.contains("charge.success")
        || event.contains("transaction.success")
        || event.contains("payment.complete")
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebhookPayload {
    pub event: String,
    pub data: WebhookData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct WebhookData {
    pub reference: String,
}
