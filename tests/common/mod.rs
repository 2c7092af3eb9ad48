#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use audit_dashboard::AppState;
use audit_dashboard::analysis::AnalysisSettings;
use audit_dashboard::llm::{GenerateRequest, GenerateResponse, LlmClient, Provider};
use audit_dashboard::reports::ReportStore;
use audit_dashboard::routes::create_router;

/// What the scripted provider answers with.
#[derive(Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
}

/// Provider double that records every request it receives.
pub struct ScriptedProvider {
    reply: Reply,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|req| req.prompt.clone())
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    async fn generate(&self, req: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        match &self.reply {
            Reply::Text(content) => Ok(GenerateResponse {
                content: content.clone(),
                model: req.model.clone(),
                input_tokens: 120,
                output_tokens: 80,
                finish_reason: "stop".to_string(),
            }),
            Reply::Fail(msg) => Err(anyhow::anyhow!("{msg}")),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub struct TestApp {
    pub router: Router,
    pub provider: Arc<ScriptedProvider>,
    pub dir: TempDir,
}

impl TestApp {
    pub fn new(reply: Reply) -> Self {
        Self::with_files(reply, &[])
    }

    pub fn with_files(reply: Reply, files: &[(&str, &str)]) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        for (name, contents) in files {
            write_file(dir.path(), name, contents);
        }

        let provider = ScriptedProvider::new(reply);
        let state = AppState {
            reports: ReportStore::new(dir.path()),
            llm_client: Arc::new(LlmClient::new(provider.clone())),
            analysis: AnalysisSettings {
                model: "gemini-1.5-pro".to_string(),
                temperature: 0.2,
                max_tokens: 4096,
                max_rfcs: 30,
            },
        };

        Self {
            router: create_router(state),
            provider,
            dir,
        }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("request");
        self.send(request).await
    }

    /// Body as sent on the wire, for assertions on key order.
    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request");
        let (status, bytes) = self.send_raw(request).await;
        (status, String::from_utf8(bytes).expect("utf-8 body"))
    }

    /// POST with no `Content-Type` header.
    pub async fn post_untyped(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::from(body))
            .expect("request");
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = self.send_raw(request).await;
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, bytes.to_vec())
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("write fixture");
}

pub fn rfc_list(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("RFC{i:06}AB{}", i % 10)).collect()
}
