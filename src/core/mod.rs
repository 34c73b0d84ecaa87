pub mod auth;
pub mod checkout;
pub mod notify;
pub mod webhook;

pub use checkout::{CheckoutService, VerifyOutcome, WebhookOutcome};
pub use notify::Notifier;
