//! End-to-end tests for the Harborview server.
//!
//! Each test gets its own server bound to an ephemeral port on loopback, with
//! a fresh data file and static directory in a temporary directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p harborview-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `contact_api` - Contact form submission and the staff inbox
//! - `testimonials_api` - Public listing, ranking, stats, moderation
//! - `admin_guard` - `x-admin-key` enforcement
//! - `platform` - Health, CORS, static files, body limits, unknown routes

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;

use reqwest::{Client, RequestBuilder, Response};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tempfile::TempDir;
use tokio::net::TcpListener;

use harborview_server::config::ServerConfig;
use harborview_server::state::AppState;

/// Admin key used by [`TestContext::with_admin_key`].
pub const TEST_ADMIN_KEY: &str = "kR7#pQ2vX9!mLw4zT8sNb";

/// A running server and a client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub data_file: PathBuf,
    admin_key: Option<String>,
    _dir: TempDir,
    server: tokio::task::JoinHandle<()>,
}

impl TestContext {
    /// Start a server with the admin guard disabled.
    pub async fn new() -> Self {
        Self::start(None).await
    }

    /// Start a server that requires [`TEST_ADMIN_KEY`] on admin routes.
    ///
    /// Admin helpers on the returned context send the key automatically.
    pub async fn with_admin_key() -> Self {
        Self::start(Some(TEST_ADMIN_KEY)).await
    }

    async fn start(admin_key: Option<&str>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let data_file = dir.path().join("data").join("db.json");
        let static_dir = dir.path().join("public");
        std::fs::create_dir_all(&static_dir).unwrap();
        std::fs::write(static_dir.join("hello.txt"), "hello from harborview").unwrap();

        let mut config = ServerConfig::local(&data_file);
        config.static_dir = static_dir;
        config.admin_key = admin_key.map(|key| SecretString::from(key.to_string()));

        let state = AppState::new(config).await.unwrap();
        let app = harborview_server::router(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
            data_file,
            admin_key: admin_key.map(String::from),
            _dir: dir,
            server,
        }
    }

    /// Absolute URL for a path like `/api/contact`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Public GET.
    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    /// Public GET, decoded as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> T {
        self.get(path).await.json().await.unwrap()
    }

    /// Public POST with a JSON body.
    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    /// Attach the admin key, if this context has one.
    #[must_use]
    pub fn admin(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.admin_key {
            Some(key) => request.header("x-admin-key", key),
            None => request,
        }
    }

    /// Admin GET.
    pub async fn admin_get(&self, path: &str) -> Response {
        self.admin(self.client.get(self.url(path)))
            .send()
            .await
            .unwrap()
    }

    /// Admin GET, decoded as JSON.
    pub async fn admin_json<T: DeserializeOwned>(&self, path: &str) -> T {
        self.admin_get(path).await.json().await.unwrap()
    }

    /// Admin PATCH with an optional JSON body.
    pub async fn admin_patch(&self, path: &str, body: Option<&Value>) -> Response {
        let mut request = self.admin(self.client.patch(self.url(path)));
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.unwrap()
    }

    /// Admin DELETE.
    pub async fn admin_delete(&self, path: &str) -> Response {
        self.admin(self.client.delete(self.url(path)))
            .send()
            .await
            .unwrap()
    }

    /// Submit a valid contact message and return its ID.
    pub async fn submit_message(&self, name: &str) -> String {
        let body = serde_json::json!({
            "name": name,
            "email": "guest@example.com",
            "subject": "Late check-in",
            "message": "We will arrive around midnight.",
        });
        let resp = self.post_json("/api/contact", &body).await;
        assert_eq!(resp.status(), 201);
        let json: Value = resp.json().await.unwrap();
        json["id"].as_str().unwrap().to_string()
    }

    /// Submit a valid testimonial and return the stored record.
    pub async fn submit_testimonial(&self, name: &str, rating: u8) -> Value {
        let body = serde_json::json!({
            "name": name,
            "rating": rating,
            "message": "Wonderful stay by the harbor.",
        });
        let resp = self.post_json("/api/testimonials", &body).await;
        assert_eq!(resp.status(), 201);
        resp.json().await.unwrap()
    }

    /// Parsed contents of the data file.
    #[must_use]
    pub fn data_file_json(&self) -> Value {
        let raw = std::fs::read_to_string(&self.data_file).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}
