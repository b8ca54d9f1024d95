// crates/process-registry-store-sqlite/src/lib.rs
// ============================================================================
// Module: SQLite Process Store
// Description: Durable ProcessStore backend using SQLite.
// Purpose: Provide production persistence for process records.
// Dependencies: process-registry-core, rusqlite
// ============================================================================

//! ## Overview
//! This crate provides a SQLite-backed
//! [`ProcessStore`](process_registry_core::ProcessStore) implementation. The
//! schema mirrors the validator's rules with CHECK constraints and refreshes
//! `updated_at` with a trigger, so even direct writes outside this crate
//! cannot silently break the record invariants.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteJournalMode;
pub use store::SqliteProcessStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteSyncMode;
