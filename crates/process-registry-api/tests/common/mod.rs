// crates/process-registry-api/tests/common/mod.rs
// ============================================================================
// Module: API Test Fixtures
// Description: Shared router and request helpers for integration tests.
// Purpose: Drive the full router in-process via tower oneshot.
// Dependencies: process-registry-api, process-registry-core, tower, http-body-util
// ============================================================================

//! ## Overview
//! Builds the real router over an in-memory store and provides helpers that
//! send JSON and multipart requests without binding a socket.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only fixtures; not every suite uses every helper."
)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use http_body_util::BodyExt;
use process_registry_core::InMemoryProcessStore;
use serde_json::Value;
use serde_json::json;
use tower::ServiceExt;

/// Multipart boundary used by the upload helper.
const BOUNDARY: &str = "process-registry-test-boundary";
/// Upload cap for test routers (1 MiB).
const TEST_UPLOAD_CAP: usize = 1024 * 1024;

/// Builds the registry router over a fresh in-memory store.
pub fn test_router() -> Router {
    process_registry_api::build_router(Arc::new(InMemoryProcessStore::new()), TEST_UPLOAD_CAP)
}

/// Returns a valid create payload with the given process name.
pub fn draft_json(name: &str) -> Value {
    json!({
        "email_id": "clerk@example.com",
        "department": "AP",
        "process_name": name,
        "description": "month-end close support",
        "apps_used": "ERP, Excel",
        "frequency": "DAILY",
        "duration": "00:30",
        "volume": 12,
        "process_status": "UNSTRUCTURED",
    })
}

/// Sends a JSON request and returns the status and decoded body.
pub async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    body: &Value,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    dispatch(router, request).await
}

/// Sends a bodyless request and returns the status and decoded body.
pub async fn send_empty(router: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    dispatch(router, request).await
}

/// Sends a multipart CSV upload and returns the status and decoded body.
pub async fn send_csv(
    router: &Router,
    filename: &str,
    content: &str,
) -> (StatusCode, Value) {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/processes/upload-csv")
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .expect("build request");
    dispatch(router, request).await
}

/// Dispatches one request through the router.
async fn dispatch(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("dispatch");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("read body").to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}
