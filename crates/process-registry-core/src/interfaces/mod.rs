// crates/process-registry-core/src/interfaces/mod.rs
// ============================================================================
// Module: Process Registry Interfaces
// Description: Backend-agnostic storage contract for process records.
// Purpose: Define the store surface the HTTP layer and imports depend on.
// Dependencies: crate::core, serde, thiserror
// ============================================================================

//! ## Overview
//! [`ProcessStore`] is the only seam through which the registry touches
//! persistent storage. Implementations own the derived-metrics invariant on
//! the update path: when a change set touches `volume`, `frequency`, or
//! `duration`, the store recomputes `yearly_volume` and `yearly_duration`
//! before persisting. Pagination ordering must be stable across calls
//! absent mutation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::Department;
use crate::core::NewProcess;
use crate::core::ProcessChanges;
use crate::core::ProcessId;
use crate::core::ProcessRecord;
use crate::core::ProcessStatus;
use crate::core::YearlyMetrics;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default page size for list queries.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Maximum page size for list queries.
pub const MAX_PAGE_SIZE: u32 = 100;

// ============================================================================
// SECTION: Queries
// ============================================================================

/// Parameters for a paginated, filtered list of process records.
///
/// # Invariants
/// - `limit` is between 1 and [`MAX_PAGE_SIZE`]; callers validate bounds
///   before constructing a query.
/// - Filters are exact-match equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    /// Number of records to skip.
    pub skip: u32,
    /// Maximum number of records to return.
    pub limit: u32,
    /// Optional department filter.
    pub department: Option<Department>,
    /// Optional status filter.
    pub status: Option<ProcessStatus>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
            department: None,
            status: None,
        }
    }
}

/// One page of list results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessPage {
    /// Records on this page, ordered by ascending identifier.
    pub processes: Vec<ProcessRecord>,
    /// Total records matching the filters, ignoring pagination.
    pub total: u64,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Storage backend failure.
///
/// # Invariants
/// - Messages never embed full record payloads.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Store I/O error.
    #[error("store io error: {0}")]
    Io(String),
    /// Database engine error.
    #[error("store db error: {0}")]
    Db(String),
    /// Invalid stored data or invalid request against stored data.
    #[error("store invalid data: {0}")]
    Invalid(String),
    /// Stored data failed an integrity check.
    #[error("store corruption: {0}")]
    Corrupt(String),
}

// ============================================================================
// SECTION: Process Store
// ============================================================================

/// Persistent store for process records.
///
/// Each operation is a single logical round trip; there is no cross-request
/// state in the store interface itself. Concurrent updates to one record
/// are last-write-wins.
pub trait ProcessStore: Send + Sync {
    /// Persists a validated record with its derived metrics.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend rejects the write.
    fn create(
        &self,
        new: &NewProcess,
        metrics: &YearlyMetrics,
    ) -> Result<ProcessRecord, StoreError>;

    /// Fetches a record by identifier (`None` when absent).
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn get(&self, id: ProcessId) -> Result<Option<ProcessRecord>, StoreError>;

    /// Lists records matching `query`, with the unpaginated match total.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend read fails.
    fn list(&self, query: &ListQuery) -> Result<ProcessPage, StoreError>;

    /// Applies a validated change set to a record (`None` when absent).
    ///
    /// Recomputes derived metrics iff the change set touches `volume`,
    /// `frequency`, or `duration`, and refreshes `updated_at`.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend write fails or metric
    /// recomputation fails on the merged record.
    fn update(
        &self,
        id: ProcessId,
        changes: &ProcessChanges,
    ) -> Result<Option<ProcessRecord>, StoreError>;

    /// Deletes a record by identifier (`false` when absent).
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backend write fails.
    fn delete(&self, id: ProcessId) -> Result<bool, StoreError>;
}
