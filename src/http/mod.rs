// HTTP surface: one axum router over the checkout workflow, the stores and
// the notifier.
//
// Endpoints:
//   GET  /api/health
//   POST /api/contact
//   GET  /api/contact/messages
//   POST /api/login
//   POST /api/profile
//   POST /api/payments/init
//   POST /api/payments/verify
//   POST /api/webhooks/paystack
//   GET  /api/orders
//   POST /api/orders

pub mod routes;

use crate::adapters::{PaystackClient, SendgridMailer, TwilioSms};
use crate::config::AppConfig;
use crate::core::{CheckoutService, Notifier};
use crate::domain::ports::{Mailer, PaymentGateway, SmsSender};
use crate::store::{ContactStore, OrderStore, ProfileStore};
use crate::utils::error::{Result, StorefrontError};
use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

pub struct AppContext {
    pub config: AppConfig,
    pub checkout: CheckoutService,
    pub notifier: Notifier,
    pub orders: Arc<OrderStore>,
    pub contacts: Arc<ContactStore>,
    pub profiles: Arc<ProfileStore>,
}

impl AppContext {
    pub fn from_config(config: AppConfig) -> Result<Arc<Self>> {
        let data_dir = Path::new(&config.store.data_dir);
        let orders = Arc::new(OrderStore::new(data_dir));
        let contacts = Arc::new(ContactStore::new(data_dir));
        let profiles = Arc::new(ProfileStore::new(data_dir));

        let gateway: Arc<dyn PaymentGateway> = Arc::new(PaystackClient::new(
            config.gateway.base_url.clone(),
            config.gateway.secret_key.clone(),
        ));
        let mailer: Option<Arc<dyn Mailer>> = if config.email.api_key.is_empty() {
            None
        } else {
            Some(Arc::new(SendgridMailer::new(
                config.email.base_url.clone(),
                config.email.api_key.clone(),
                config.email.from.clone(),
            )))
        };
        let sms: Option<Arc<dyn SmsSender>> = if config.sms.account_sid.is_empty()
            || config.sms.auth_token.is_empty()
            || config.sms.from.is_empty()
        {
            None
        } else {
            Some(Arc::new(TwilioSms::new(
                config.sms.base_url.clone(),
                config.sms.account_sid.clone(),
                config.sms.auth_token.clone(),
                config.sms.from.clone(),
            )))
        };

        let notifier = Notifier::new(
            mailer,
            sms,
            config.email.to.clone(),
            config.sms.notify_to.clone(),
            config.store.shop_name.clone(),
            config.store.currency_symbol.clone(),
        );
        let checkout = CheckoutService::new(
            gateway,
            notifier.clone(),
            orders.clone(),
            config.gateway.secret_key.clone(),
        );

        Ok(Arc::new(Self {
            config,
            checkout,
            notifier,
            orders,
            contacts,
            profiles,
        }))
    }
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-admin-token"),
            HeaderName::from_static("x-admin-key"),
        ]);

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/contact", post(routes::contact::submit))
        .route("/api/contact/messages", get(routes::contact::list))
        .route("/api/login", post(routes::login::login))
        .route("/api/profile", post(routes::profiles::save))
        .route("/api/payments/init", post(routes::payments::init))
        .route("/api/payments/verify", post(routes::payments::verify))
        .route("/api/webhooks/paystack", post(routes::payments::webhook))
        .route(
            "/api/orders",
            get(routes::orders::list).post(routes::orders::submit),
        )
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .with_state(ctx)
}

pub async fn serve(ctx: Arc<AppContext>) -> Result<()> {
    let addr: SocketAddr =
        ctx.config
            .server
            .bind
            .parse()
            .map_err(|e| StorefrontError::Config {
                message: format!("invalid bind address '{}': {}", ctx.config.server.bind, e),
            })?;
    let router = build_router(ctx);
    tracing::info!("storefront API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        let status = match &self {
            StorefrontError::Validation { .. }
            | StorefrontError::InvalidSignature
            | StorefrontError::GatewayRejected { .. } => StatusCode::BAD_REQUEST,
            StorefrontError::Unauthorized => StatusCode::UNAUTHORIZED,
            StorefrontError::GatewayUnexpected { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!("request failed: {}", self);
        } else {
            tracing::warn!("request rejected: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
