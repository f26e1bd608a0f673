// Shared helpers for router tests

use crate::config::{Config, GeminiConfig, ServerConfig, UploadConfig};
use crate::llm::CompletionClient;
use crate::models::AppState;
use crate::routes::create_router;
use crate::types::CompletionError;
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const BOUNDARY: &str = "doc-relay-test-boundary";

/// Deterministic completion backend that records every prompt it sees.
pub struct MockCompletion {
    reply: Result<String, String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    watched_dir: Mutex<Option<PathBuf>>,
    files_at_call: Mutex<Vec<usize>>,
}

impl MockCompletion {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self::with_reply(Ok(text.to_string())))
    }

    /// Fails every call with `UpstreamRejected(message)`
    pub fn rejecting(message: &str) -> Arc<Self> {
        Arc::new(Self::with_reply(Err(message.to_string())))
    }

    fn with_reply(reply: Result<String, String>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            watched_dir: Mutex::new(None),
            files_at_call: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Record how many files `dir` holds whenever `complete` is called
    pub fn watch_dir(&self, dir: &Path) {
        *self.watched_dir.lock().unwrap() = Some(dir.to_path_buf());
    }

    pub fn files_at_call(&self) -> Vec<usize> {
        self.files_at_call.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if let Some(dir) = self.watched_dir.lock().unwrap().as_ref() {
            self.files_at_call.lock().unwrap().push(count_files(dir));
        }

        self.reply.clone().map_err(CompletionError::UpstreamRejected)
    }
}

pub fn test_config(upload_dir: &Path) -> Config {
    Config {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
            json_body_limit: 5 * 1024 * 1024,
        },
        gemini: GeminiConfig::new("test-key"),
        uploads: UploadConfig {
            dir: upload_dir.to_path_buf(),
            body_limit: 1024 * 1024,
        },
    }
}

/// Router wired to `completion`, with a private upload directory.
pub fn test_app(completion: Arc<MockCompletion>) -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let state = AppState::new(test_config(dir.path()), completion);
    (create_router(state), dir)
}

pub fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

pub fn json_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// A multipart request carrying one part named `field`.
pub fn multipart_request(uri: &str, field: &str, file_name: &str, content_type: Option<&str>, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n", field, file_name).as_bytes(),
    );
    if let Some(content_type) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(body))
        .unwrap()
}

/// A multipart request with one plain form value (no `filename`).
pub fn form_value_request(uri: &str, field: &str, value: &str) -> Request<Body> {
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n--{b}--\r\n",
        b = BOUNDARY,
        field = field,
        value = value,
    );

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(body))
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
