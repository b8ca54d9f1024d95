// crates/process-registry-api/src/lib.rs
// ============================================================================
// Module: Process Registry API
// Description: HTTP surface for the process registry.
// Purpose: Expose CRUD routes, CSV bulk import, and liveness endpoints.
// Dependencies: axum, csv, process-registry-core, process-registry-store-sqlite
// ============================================================================

//! ## Overview
//! This crate wires the core validation and derivation pipeline to an axum
//! router. Every write route runs the same path: decode the raw payload,
//! validate it into a normalized form, derive yearly metrics where needed,
//! and hand the result to the configured [`ProcessStore`]
//! (process_registry_core::ProcessStore). Errors map to the `{"detail": ...}`
//! wire convention throughout.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod error;
pub mod import;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::RegistryConfig;
pub use config::ServerConfig;
pub use config::StoreConfig;
pub use error::ApiError;
pub use import::ImportReport;
pub use server::ServeError;
pub use server::build_router;
pub use server::serve;
