// crates/process-registry-core/src/lib.rs
// ============================================================================
// Module: Process Registry Core Library
// Description: Public API surface for the Process Registry core.
// Purpose: Expose domain types, the validator, the deriver, and store contracts.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Process Registry core holds everything the HTTP layer and the storage
//! backends share: the record model, the business-rule validator, the
//! yearly-metrics deriver, and the [`interfaces::ProcessStore`] contract.
//! It is framework-agnostic and carries no storage or HTTP dependencies.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::DEFAULT_PAGE_SIZE;
pub use interfaces::ListQuery;
pub use interfaces::MAX_PAGE_SIZE;
pub use interfaces::ProcessPage;
pub use interfaces::ProcessStore;
pub use interfaces::StoreError;
pub use runtime::InMemoryProcessStore;
