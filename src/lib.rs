pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod store;
pub mod utils;

pub use config::AppConfig;
pub use http::{build_router, serve, AppContext};
pub use utils::error::{Result, StorefrontError};
