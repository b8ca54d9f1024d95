// crates/process-registry-api/tests/api_crud.rs
// ============================================================================
// Module: API CRUD Tests
// Description: Full-router tests for the process CRUD and liveness routes.
// Purpose: Pin the HTTP contract end to end over an in-memory store.
// Dependencies: process-registry-api, tower, http-body-util, serde_json
// ============================================================================

//! ## Overview
//! Drives the real router through create, read, list, update, and delete,
//! asserting status codes and the `{"detail": ...}` error convention.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::draft_json;
use common::send_empty;
use common::send_json;
use common::test_router;

/// Create returns 201 with derived metrics and timestamps filled in.
#[tokio::test]
async fn create_returns_record_with_metrics() {
    let router = test_router();
    let (status, body) = send_json(&router, "POST", "/api/processes", &draft_json("invoice")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["process_name"], "invoice");
    assert_eq!(body["yearly_volume"], 2640);
    assert_eq!(body["yearly_duration"], "1320:00");
    assert!(body["id"].as_i64().expect("id") > 0);
    assert!(body["created_at"].as_i64().expect("created_at") > 0);
}

/// Create rejects an invalid draft with the full violation list.
#[tokio::test]
async fn create_rejects_invalid_draft() {
    let router = test_router();
    let mut draft = draft_json("invoice");
    draft["email_id"] = json!("not-an-email");
    draft["duration"] = json!("9:00");
    let (status, body) = send_json(&router, "POST", "/api/processes", &draft).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["detail"].as_array().expect("violations");
    assert_eq!(details.len(), 2);
    assert_eq!(details[0]["field"], "email_id");
    assert_eq!(details[1]["field"], "duration");
    assert_eq!(details[1]["code"], "invalid_format");
}

/// Get round-trips a created record and 404s on unknown ids.
#[tokio::test]
async fn get_roundtrips_and_404s() {
    let router = test_router();
    let (_, created) = send_json(&router, "POST", "/api/processes", &draft_json("invoice")).await;
    let id = created["id"].as_i64().expect("id");

    let (status, fetched) = send_empty(&router, "GET", &format!("/api/processes/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, body) = send_empty(&router, "GET", "/api/processes/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Process not found");
}

/// List paginates and filters by department.
#[tokio::test]
async fn list_paginates_and_filters() {
    let router = test_router();
    for index in 0..3 {
        let mut draft = draft_json(&format!("ap-{index}"));
        draft["department"] = json!("AP");
        send_json(&router, "POST", "/api/processes", &draft).await;
    }
    let mut other = draft_json("gl-0");
    other["department"] = json!("GL");
    send_json(&router, "POST", "/api/processes", &other).await;

    let (status, body) =
        send_empty(&router, "GET", "/api/processes?department=AP&skip=1&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    let names: Vec<&str> = body["processes"]
        .as_array()
        .expect("page")
        .iter()
        .map(|record| record["process_name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["ap-1", "ap-2"]);
}

/// List rejects out-of-range limits and unknown filter tokens.
#[tokio::test]
async fn list_rejects_bad_parameters() {
    let router = test_router();
    let (status, _) = send_empty(&router, "GET", "/api/processes?limit=101").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send_empty(&router, "GET", "/api/processes?department=HR").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid department: HR");
}

/// Update applies the patch, recomputes metrics, and validates input.
#[tokio::test]
async fn update_recomputes_metrics_and_validates() {
    let router = test_router();
    let (_, created) = send_json(&router, "POST", "/api/processes", &draft_json("invoice")).await;
    let id = created["id"].as_i64().expect("id");
    let uri = format!("/api/processes/{id}");

    let (status, updated) = send_json(&router, "PUT", &uri, &json!({ "volume": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["volume"], 1);
    assert_eq!(updated["yearly_volume"], 220);
    assert_eq!(updated["yearly_duration"], "110:00");

    let (status, body) = send_json(&router, "PUT", &uri, &json!({ "volume": 0 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["detail"].as_array().expect("violations");
    assert_eq!(details[0]["field"], "volume");

    let (status, body) = send_json(&router, "PUT", "/api/processes/999", &json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Process not found");
}

/// Delete reports success once, then 404s.
#[tokio::test]
async fn delete_then_404() {
    let router = test_router();
    let (_, created) = send_json(&router, "POST", "/api/processes", &draft_json("invoice")).await;
    let id = created["id"].as_i64().expect("id");
    let uri = format!("/api/processes/{id}");

    let (status, body) = send_empty(&router, "DELETE", &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Process deleted successfully");

    let (status, body) = send_empty(&router, "DELETE", &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Process not found");
}

/// Liveness endpoints answer with status payloads.
#[tokio::test]
async fn liveness_endpoints_answer() {
    let router = test_router();
    let (status, body) = send_empty(&router, "GET", "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send_empty(&router, "GET", "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["timestamp"].as_i64().expect("timestamp") > 0);
}
