use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{message}")]
    Validation { message: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Gateway rejected request: {message}")]
    GatewayRejected { message: String },

    #[error("Unexpected gateway response: {message}")]
    GatewayUnexpected { message: String },

    #[error("Notification send failed: {message}")]
    Notification { message: String },
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
