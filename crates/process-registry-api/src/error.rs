// crates/process-registry-api/src/error.rs
// ============================================================================
// Module: API Errors
// Description: Error type for HTTP handlers and its response mapping.
// Purpose: Map pipeline failures to the `{"detail": ...}` wire convention.
// Dependencies: axum, serde_json, thiserror, tracing, process-registry-core
// ============================================================================

//! ## Overview
//! Every handler returns [`ApiError`] on failure. The [`IntoResponse`]
//! mapping is the single place status codes and wire payloads are decided:
//! validation failures carry the full violation list, not-found is a fixed
//! message, and store or calculation failures log full context server-side
//! while the client sees only a generic detail string.

// ============================================================================
// SECTION: Imports
// ============================================================================

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use process_registry_core::CalculationError;
use process_registry_core::StoreError;
use process_registry_core::Violation;
use serde_json::json;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Detail string returned for any internal failure.
const GENERIC_FAILURE_DETAIL: &str = "Internal server error occurred. Please try again later.";
/// Detail string returned when metric derivation fails.
const CALCULATION_FAILURE_DETAIL: &str = "Error calculating yearly metrics";
/// Detail string returned when a record id does not exist.
const NOT_FOUND_DETAIL: &str = "Process not found";

// ============================================================================
// SECTION: Error Type
// ============================================================================

/// Failures surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request payload failed validation.
    #[error("validation failed with {} violation(s)", .0.len())]
    Validation(Vec<Violation>),
    /// Requested record does not exist.
    #[error("process not found")]
    NotFound,
    /// Request is malformed in a way validation does not cover.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Yearly metric derivation failed.
    #[error("calculation failed: {0}")]
    Calculation(#[from] CalculationError),
    /// Store operation failed.
    #[error("store failed: {0}")]
    Store(#[from] StoreError),
}

impl From<Vec<Violation>> for ApiError {
    fn from(violations: Vec<Violation>) -> Self {
        Self::Validation(violations)
    }
}

// ============================================================================
// SECTION: Response Mapping
// ============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(violations) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": violations }))).into_response()
            }
            Self::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": NOT_FOUND_DETAIL })))
                    .into_response()
            }
            Self::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            Self::Calculation(error) => {
                tracing::error!(%error, "yearly metric derivation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": CALCULATION_FAILURE_DETAIL })),
                )
                    .into_response()
            }
            Self::Store(error) => {
                tracing::error!(%error, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": GENERIC_FAILURE_DETAIL })),
                )
                    .into_response()
            }
        }
    }
}
