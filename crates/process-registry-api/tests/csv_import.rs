// crates/process-registry-api/tests/csv_import.rs
// ============================================================================
// Module: CSV Upload Tests
// Description: Full-router tests for the multipart CSV import route.
// Purpose: Pin upload gating and the per-row import report contract.
// Dependencies: process-registry-api, tower, http-body-util, serde_json
// ============================================================================

//! ## Overview
//! Drives the multipart upload route end to end: extension gating, header
//! validation, row independence, and the import report payload.

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

use common::send_csv;
use common::send_empty;
use common::test_router;

/// Standard header line shared by the fixtures.
const HEADER: &str = "Email ID,Team,Process Name,Description,Apps Used,Frequency,Duration,\
                      Volume,Process Status,Documentation";

/// A clean upload imports every row and reports the counts.
#[tokio::test]
async fn clean_upload_imports_all_rows() {
    let router = test_router();
    let content = format!(
        "{HEADER}\n\
         a@example.com,AP,invoice entry,,ERP,DAILY,00:30,12,UNSTRUCTURED,\n\
         b@example.com,GL,journal review,,Excel,MONTHLY,01:00,3,OPTIMIZED,\n"
    );
    let (status, body) = send_csv(&router, "processes.csv", &content).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "CSV import completed");
    assert_eq!(body["success_count"], 2);
    assert_eq!(body["error_count"], 0);

    let (_, page) = send_empty(&router, "GET", "/api/processes").await;
    assert_eq!(page["total"], 2);
}

/// A bad row is reported with its file line number; neighbors import.
#[tokio::test]
async fn bad_row_is_reported_and_skipped() {
    let router = test_router();
    let content = format!(
        "{HEADER}\n\
         a@example.com,AP,first,,ERP,DAILY,00:30,1,UNSTRUCTURED,\n\
         not-an-email,AP,second,,ERP,DAILY,00:30,1,UNSTRUCTURED,\n\
         c@example.com,AP,third,,ERP,DAILY,00:30,1,UNSTRUCTURED,\n"
    );
    let (status, body) = send_csv(&router, "processes.csv", &content).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success_count"], 2);
    assert_eq!(body["error_count"], 1);
    let errors = body["errors"].as_array().expect("errors");
    assert_eq!(errors.len(), 1);
    let message = errors[0].as_str().expect("error message");
    assert!(message.starts_with("Row 3:"), "got: {message}");
}

/// Non-CSV filenames are rejected before any parsing.
#[tokio::test]
async fn non_csv_filename_is_rejected() {
    let router = test_router();
    let (status, body) = send_csv(&router, "processes.xlsx", "not,a,csv").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Only CSV files are allowed");
}

/// A header missing a required column fails the whole upload.
#[tokio::test]
async fn missing_column_fails_upload() {
    let router = test_router();
    let content = "Email ID,Team,Process Name,Apps Used,Frequency,Duration,Volume\n\
                   a@example.com,AP,first,ERP,DAILY,00:30,1\n";
    let (status, body) = send_csv(&router, "processes.csv", content).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Missing required column: Process Status");
}

/// Hyphenated frequency cells import after normalization.
#[tokio::test]
async fn hyphenated_frequency_imports() {
    let router = test_router();
    let content = format!(
        "{HEADER}\n\
         a@example.com,AP,first,,ERP,Bi-Weekly,00:30,1,UNSTRUCTURED,\n"
    );
    let (status, body) = send_csv(&router, "processes.csv", &content).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success_count"], 1);

    let (_, page) = send_empty(&router, "GET", "/api/processes").await;
    assert_eq!(page["processes"][0]["frequency"], "BI_WEEKLY");
}
