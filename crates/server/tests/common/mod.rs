//! Common test utilities for driving the router in-process.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use mediaconv_core::{testing::MockConverter, Config, Converter, FileStore, StorageConfig};
use mediaconv_server::api::create_router;
use mediaconv_server::state::AppState;

/// In-process test fixture: router with a mock converter and a
/// temp-rooted file store.
pub struct TestFixture {
    pub router: Router,
    pub converter: Arc<MockConverter>,
    pub store: Arc<FileStore>,
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let config = Config {
            storage: StorageConfig {
                root: temp_dir.path().to_path_buf(),
            },
            ..Default::default()
        };

        let converter = Arc::new(MockConverter::new());
        let store = Arc::new(
            FileStore::new(temp_dir.path())
                .await
                .expect("Failed to create file store"),
        );

        let state = Arc::new(AppState::new(
            config,
            Arc::clone(&converter) as Arc<dyn Converter>,
            Arc::clone(&store),
        ));

        Self {
            router: create_router(state),
            converter,
            store,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap();
        self.request(request).await
    }

    /// Send a multipart upload with a single `file` field.
    pub async fn upload(&self, filename: &str, contents: &[u8]) -> TestResponse {
        let boundary = "test-boundary-7MA4YWxkTrZu0gW";
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(contents);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        let request = Request::post("/upload")
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Send a GET request and return the raw response parts.
    pub async fn get_raw(&self, path: &str) -> (StatusCode, Vec<u8>, HeaderMap) {
        let request = Request::get(path).body(Body::empty()).unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        (status, bytes, headers)
    }

    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
