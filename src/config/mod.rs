pub mod cli;

use crate::utils::error::{Result, StorefrontError};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub gateway: GatewayConfig,
    pub email: EmailConfig,
    pub sms: SmsConfig,
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8787".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_dir: String,
    pub shop_name: String,
    pub currency_symbol: String,
    pub currency_code: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".to_string(),
            shop_name: "Ebou Jewelry".to_string(),
            currency_symbol: "₵".to_string(),
            currency_code: "GHS".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub secret_key: String,
    pub base_url: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            base_url: "https://api.paystack.co".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub api_key: String,
    pub from: String,
    pub to: Vec<String>,
    pub base_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            from: "no-reply@example.com".to_string(),
            to: Vec::new(),
            base_url: "https://api.sendgrid.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from: String,
    pub notify_to: Vec<String>,
    pub base_url: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from: String::new(),
            notify_to: Vec::new(),
            base_url: "https://api.twilio.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    /// Lowercase hex SHA-256 of the admin password.
    pub password_sha256: String,
    /// Token gating the admin listing endpoints. Empty leaves them open.
    pub api_token: String,
}

impl AppConfig {
    /// Loads from a TOML file; a missing file yields the defaults so the
    /// server can run purely off environment variables.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::warn!("config file {} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| StorefrontError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Fills empty secrets from the environment variables the original
    /// deployment used, so an env-only setup keeps working.
    pub fn apply_env_fallbacks(&mut self) {
        fallback(&mut self.gateway.secret_key, &["PAYSTACK_SECRET_KEY"]);
        fallback(&mut self.email.api_key, &["SENDGRID_API_KEY"]);
        fallback_replace_default(
            &mut self.email.from,
            "no-reply@example.com",
            &["SENDGRID_FROM"],
        );
        if self.email.to.is_empty() {
            if let Some(raw) = first_env(&["CONTACT_NOTIFY_EMAILS", "SENDGRID_TO"]) {
                self.email.to = split_list(&raw);
            }
        }
        fallback(&mut self.sms.account_sid, &["TWILIO_ACCOUNT_SID"]);
        fallback(&mut self.sms.auth_token, &["TWILIO_AUTH_TOKEN"]);
        fallback(&mut self.sms.from, &["TWILIO_FROM"]);
        if self.sms.notify_to.is_empty() {
            if let Some(raw) = first_env(&["CONTACT_NOTIFY_PHONE", "TWILIO_TO"]) {
                self.sms.notify_to = split_list(&raw);
            }
        }
        fallback(&mut self.admin.username, &["ADMIN_USERNAME"]);
        fallback(&mut self.admin.password_sha256, &["ADMIN_PASSWORD_HASH"]);
        fallback(
            &mut self.admin.api_token,
            &["CONTACT_ADMIN_TOKEN", "ADMIN_API_KEY"],
        );
    }
}

fn fallback(slot: &mut String, vars: &[&str]) {
    if slot.is_empty() {
        if let Some(value) = first_env(vars) {
            *slot = value;
        }
    }
}

fn fallback_replace_default(slot: &mut String, default: &str, vars: &[&str]) {
    if slot.is_empty() || slot == default {
        if let Some(value) = first_env(vars) {
            *slot = value;
        }
    }
}

fn first_env(vars: &[&str]) -> Option<String> {
    vars.iter()
        .filter_map(|v| std::env::var(v).ok())
        .find(|v| !v.is_empty())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Replaces `${VAR_NAME}` placeholders with environment values; unknown
/// variables are left as-is.
fn substitute_env_vars(content: &str) -> String {
    let re = regex::Regex::new(r"\$\{([^}]+)\}").expect("static env-var pattern");
    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.bind", &self.server.bind)?;
        validate_path("store.data_dir", &self.store.data_dir)?;
        validate_url("gateway.base_url", &self.gateway.base_url)?;
        validate_url("email.base_url", &self.email.base_url)?;
        validate_url("sms.base_url", &self.sms.base_url)?;
        if !self.email.api_key.is_empty() {
            validate_non_empty_string("email.from", &self.email.from)?;
        }
        if !self.sms.account_sid.is_empty() || !self.sms.auth_token.is_empty() {
            validate_non_empty_string("sms.account_sid", &self.sms.account_sid)?;
            validate_non_empty_string("sms.auth_token", &self.sms.auth_token)?;
            validate_non_empty_string("sms.from", &self.sms.from)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic_config() {
        let toml_content = r#"
[server]
bind = "0.0.0.0:9000"

[store]
data_dir = "./test-data"
shop_name = "Test Shop"

[gateway]
secret_key = "sk_test_abc"

[admin]
username = "owner"
api_token = "tok"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.store.shop_name, "Test Shop");
        assert_eq!(config.gateway.secret_key, "sk_test_abc");
        assert_eq!(config.gateway.base_url, "https://api.paystack.co");
        assert_eq!(config.admin.api_token, "tok");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_var_substitution() {
        std::env::set_var("STOREFRONT_TEST_SECRET", "sk_live_xyz");
        let toml_content = r#"
[gateway]
secret_key = "${STOREFRONT_TEST_SECRET}"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.gateway.secret_key, "sk_live_xyz");
        std::env::remove_var("STOREFRONT_TEST_SECRET");
    }

    #[test]
    fn unknown_env_var_left_in_place() {
        let toml_content = r#"
[gateway]
secret_key = "${STOREFRONT_TEST_UNSET_VAR}"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.gateway.secret_key, "${STOREFRONT_TEST_UNSET_VAR}");
    }

    #[test]
    fn invalid_gateway_url_fails_validation() {
        let toml_content = r#"
[gateway]
base_url = "not-a-url"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn sms_partially_configured_fails_validation() {
        let toml_content = r#"
[sms]
account_sid = "AC123"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_fallbacks_fill_empty_secrets() {
        std::env::set_var("STOREFRONT_TEST_PAYSTACK", "sk_env");
        let mut config = AppConfig::default();
        fallback(&mut config.gateway.secret_key, &["STOREFRONT_TEST_PAYSTACK"]);
        assert_eq!(config.gateway.secret_key, "sk_env");

        config.gateway.secret_key = "sk_file".to_string();
        fallback(&mut config.gateway.secret_key, &["STOREFRONT_TEST_PAYSTACK"]);
        assert_eq!(config.gateway.secret_key, "sk_file");
        std::env::remove_var("STOREFRONT_TEST_PAYSTACK");
    }

    #[test]
    fn recipient_lists_split_on_commas() {
        assert_eq!(
            split_list("a@example.com, b@example.com,,  "),
            vec!["a@example.com".to_string(), "b@example.com".to_string()]
        );
    }
}
