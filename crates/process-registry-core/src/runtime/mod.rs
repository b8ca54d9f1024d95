// crates/process-registry-core/src/runtime/mod.rs
// ============================================================================
// Module: Process Registry Runtime Helpers
// Description: Reference store implementation for tests and demos.
// Purpose: Keep dependency-free runtime pieces out of the pure core model.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime helpers that are useful to hosts and tests but are not part of
//! the core model: currently the in-memory [`crate::interfaces::ProcessStore`]
//! implementation.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::InMemoryProcessStore;
