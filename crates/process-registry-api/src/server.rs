// crates/process-registry-api/src/server.rs
// ============================================================================
// Module: HTTP Server
// Description: Axum router, handlers, and serve loop for the registry API.
// Purpose: Expose CRUD, CSV import, and liveness endpoints over HTTP.
// Dependencies: axum, tokio, serde, serde_json, tracing, process-registry-core
// ============================================================================

//! ## Overview
//! The router owns no business logic. Each write handler runs the same
//! pipeline: decode the raw payload, validate it into its normalized form,
//! derive yearly metrics where the operation needs them, and delegate to the
//! shared [`ProcessStore`]. Read handlers translate query parameters into a
//! [`ListQuery`] and map absent records to 404.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use process_registry_core::Department;
use process_registry_core::ListQuery;
use process_registry_core::MAX_PAGE_SIZE;
use process_registry_core::ProcessDraft;
use process_registry_core::ProcessId;
use process_registry_core::ProcessPage;
use process_registry_core::ProcessPatch;
use process_registry_core::ProcessRecord;
use process_registry_core::ProcessStatus;
use process_registry_core::ProcessStore;
use process_registry_core::Timestamp;
use process_registry_core::derive_yearly;
use process_registry_core::validate_draft;
use process_registry_core::validate_patch;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::import;

// ============================================================================
// SECTION: Server Errors
// ============================================================================

/// Failures binding or running the HTTP server.
#[derive(Debug, Error)]
pub enum ServeError {
    /// Listen address is not a valid socket address.
    #[error("invalid listen address: {0}")]
    Address(String),
    /// Listener could not be bound.
    #[error("bind failed: {0}")]
    Bind(String),
    /// Server loop terminated with an error.
    #[error("server failed: {0}")]
    Serve(String),
}

// ============================================================================
// SECTION: State and Router
// ============================================================================

/// Shared state for all handlers.
pub struct AppState {
    /// Persistence backend for process records.
    pub store: Arc<dyn ProcessStore>,
}

/// Builds the registry router over the given store.
#[must_use]
pub fn build_router(store: Arc<dyn ProcessStore>, max_upload_bytes: usize) -> Router {
    let state = Arc::new(AppState { store });
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/processes", post(create_process).get(list_processes))
        .route(
            "/api/processes/{id}",
            get(get_process).put(update_process).delete(delete_process),
        )
        .route("/api/processes/upload-csv", post(upload_csv))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Binds the listener and serves the registry API until shutdown.
///
/// # Errors
///
/// Returns [`ServeError`] when the address is invalid, the bind fails, or
/// the server loop errors out.
pub async fn serve(config: &ServerConfig, store: Arc<dyn ProcessStore>) -> Result<(), ServeError> {
    let addr: SocketAddr = config
        .listen
        .parse()
        .map_err(|_| ServeError::Address(config.listen.clone()))?;
    let app = build_router(store, config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| ServeError::Bind(err.to_string()))?;
    tracing::info!(%addr, "process registry listening");
    axum::serve(listener, app)
        .await
        .map_err(|err| ServeError::Serve(err.to_string()))
}

// ============================================================================
// SECTION: Liveness Handlers
// ============================================================================

/// Root endpoint reporting basic liveness.
async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "Process Registry API is running",
    }))
}

/// Health endpoint for monitoring probes.
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Timestamp::now().get(),
    }))
}

// ============================================================================
// SECTION: CRUD Handlers
// ============================================================================

/// Creates a process from a raw draft.
async fn create_process(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ProcessDraft>,
) -> Result<(StatusCode, Json<ProcessRecord>), ApiError> {
    let new = validate_draft(&draft)?;
    let metrics = derive_yearly(new.volume, new.frequency, &new.duration)?;
    let record = state.store.create(&new, &metrics)?;
    tracing::info!(id = record.id.get(), name = %record.process_name, "created process");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Raw pagination and filter query parameters.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListParams {
    /// Records to skip before the page starts.
    #[serde(default)]
    skip: Option<u32>,
    /// Page size (1 to [`MAX_PAGE_SIZE`]).
    #[serde(default)]
    limit: Option<u32>,
    /// Department token filter.
    #[serde(default)]
    department: Option<String>,
    /// Status token filter.
    #[serde(default)]
    status: Option<String>,
}

/// Resolves raw query parameters into a validated list query.
pub(crate) fn resolve_list_query(params: &ListParams) -> Result<ListQuery, ApiError> {
    let defaults = ListQuery::default();
    let limit = params.limit.unwrap_or(defaults.limit);
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {MAX_PAGE_SIZE}"
        )));
    }
    let department = params
        .department
        .as_deref()
        .map(|token| {
            Department::from_token(token)
                .ok_or_else(|| ApiError::BadRequest(format!("Invalid department: {token}")))
        })
        .transpose()?;
    let status = params
        .status
        .as_deref()
        .map(|token| {
            ProcessStatus::from_token(token)
                .ok_or_else(|| ApiError::BadRequest(format!("Invalid status: {token}")))
        })
        .transpose()?;
    Ok(ListQuery {
        skip: params.skip.unwrap_or(0),
        limit,
        department,
        status,
    })
}

/// Lists processes with pagination and optional filters.
async fn list_processes(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ProcessPage>, ApiError> {
    let query = resolve_list_query(&params)?;
    let page = state.store.list(&query)?;
    Ok(Json(page))
}

/// Fetches one process by id.
async fn get_process(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ProcessRecord>, ApiError> {
    let record = state.store.get(ProcessId::new(id))?.ok_or(ApiError::NotFound)?;
    Ok(Json(record))
}

/// Applies a partial update to one process.
async fn update_process(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<ProcessPatch>,
) -> Result<Json<ProcessRecord>, ApiError> {
    let changes = validate_patch(&patch)?;
    let record = state.store.update(ProcessId::new(id), &changes)?.ok_or(ApiError::NotFound)?;
    tracing::info!(id = record.id.get(), name = %record.process_name, "updated process");
    Ok(Json(record))
}

/// Deletes one process by id.
async fn delete_process(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.store.delete(ProcessId::new(id))? {
        return Err(ApiError::NotFound);
    }
    tracing::info!(id, "deleted process");
    Ok(Json(json!({ "message": "Process deleted successfully" })))
}

// ============================================================================
// SECTION: CSV Upload Handler
// ============================================================================

/// Imports processes in bulk from an uploaded CSV file.
async fn upload_csv(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError::BadRequest(err.to_string()))?;
            upload = Some((filename, bytes.to_vec()));
            break;
        }
    }
    let Some((filename, bytes)) = upload else {
        return Err(ApiError::BadRequest("Missing file field".to_string()));
    };
    if !filename.ends_with(".csv") {
        return Err(ApiError::BadRequest("Only CSV files are allowed".to_string()));
    }
    let text = std::str::from_utf8(&bytes)
        .map_err(|_| ApiError::BadRequest("CSV file must be UTF-8".to_string()))?;
    let report = import::import_csv(state.store.as_ref(), text)?;
    tracing::info!(
        successes = report.success_count,
        failures = report.error_count,
        "csv import completed"
    );
    Ok(Json(json!({
        "message": "CSV import completed",
        "success_count": report.success_count,
        "error_count": report.error_count,
        "errors": report.errors,
    })))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
