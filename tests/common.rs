#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::{Arc, Once};
use users_server::config::{Config, DatabaseConfig, LogFormat, ServerConfig, TelemetryConfig};
use users_server::storage::UserStore;
use users_server::storage::memory::MemoryUserStore;
use users_server::{AppBuilder, api};

static INIT: Once = Once::new();

pub fn setup_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn".into())
            .add_directive("users_server=debug".parse().unwrap())
            .add_directive("mongodb=warn".parse().unwrap())
            .add_directive("tower=warn".parse().unwrap())
            .add_directive("hyper=warn".parse().unwrap())
            .add_directive("reqwest=warn".parse().unwrap());

        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}

pub fn get_test_config() -> Config {
    Config {
        database: DatabaseConfig {
            url: std::env::var("MONGODB_URL").unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            name: format!("users_server_test_{}", std::process::id()),
            collection: "users".to_string(),
            request_timeout_secs: 5,
            connect_timeout_secs: 10,
        },
        server: ServerConfig { host: "127.0.0.1".to_string(), port: 0, mgmt_port: 0 },
        telemetry: TelemetryConfig { log_format: LogFormat::Text },
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub config: Config,
}

impl TestApp {
    /// Spawns both routers backed by a fresh in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with_store(Arc::new(MemoryUserStore::new()), get_test_config()).await
    }

    pub async fn spawn_with_store(store: Arc<dyn UserStore>, config: Config) -> Self {
        setup_tracing();

        let app = AppBuilder::new(config.clone()).with_store(store).build().unwrap();

        let api_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", api_listener.local_addr().unwrap());
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());

        let app_router = api::app_router(app.app_state());
        let mgmt_router = api::mgmt_router(app.mgmt_state());

        tokio::spawn(async move {
            axum::serve(api_listener, app_router.into_make_service_with_connect_info::<SocketAddr>()).await.unwrap();
        });
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt_router.into_make_service_with_connect_info::<SocketAddr>()).await.unwrap();
        });

        Self { server_url, mgmt_url, client: reqwest::Client::new(), config }
    }

    pub async fn create_user(&self, username: &str, password: &str) -> serde_json::Value {
        let resp = self
            .client
            .post(format!("{}/users", self.server_url))
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::CREATED);
        resp.json().await.unwrap()
    }
}
