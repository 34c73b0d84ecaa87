use serde_json::Value;
use storefront::config::AppConfig;
use storefront::http::{build_router, AppContext};
use tempfile::TempDir;

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
    _data_dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed")
    }
}

/// Binds the router to an ephemeral port and serves it on a background task.
/// The config starts from defaults with a per-test temp data directory;
/// `configure` fills in whatever the test needs (gateway URLs, admin
/// credentials, notification endpoints).
pub async fn spawn_app<F>(configure: F) -> TestApp
where
    F: FnOnce(&mut AppConfig),
{
    let data_dir = TempDir::new().expect("temp dir");
    let mut config = AppConfig::default();
    config.store.data_dir = data_dir.path().to_string_lossy().to_string();
    configure(&mut config);

    let ctx = AppContext::from_config(config).expect("app context");
    let router = build_router(ctx);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server exited");
    });

    TestApp {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
        _data_dir: data_dir,
    }
}
