#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use hirescout::models::candidate::Candidate;
use hirescout::models::job::Job;
use hirescout::routes::{self, AppState};
use hirescout::store::MemoryStore;
use hirescout::{Aggregator, ExtractionError, TextExtractor};

pub const UPLOAD_LIMIT: usize = 1024 * 1024;

/// Extractor that ignores the bytes and returns fixed text.
pub struct FixedText(pub &'static str);

impl TextExtractor for FixedText {
    fn extract_text(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
        Ok(self.0.to_string())
    }
}

pub fn app_with(aggregator: Aggregator, extractor: Arc<dyn TextExtractor>) -> Router {
    let state = AppState {
        aggregator: Arc::new(aggregator),
        extractor,
        candidates: Arc::new(MemoryStore::<Candidate>::new()),
        jobs: Arc::new(MemoryStore::<Job>::new()),
    };
    routes::app(state, UPLOAD_LIMIT)
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

const BOUNDARY: &str = "hirescout-test-boundary";

pub fn multipart_upload(field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/parse-cv")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
