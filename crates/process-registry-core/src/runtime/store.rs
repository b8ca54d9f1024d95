// crates/process-registry-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Process Store
// Description: Simple in-memory process store for tests and examples.
// Purpose: Provide a deterministic store implementation without external deps.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! This module provides a simple in-memory implementation of
//! [`ProcessStore`] for tests and local demos. It is not intended for
//! production use; identifiers are assigned from a monotonically increasing
//! counter and nothing survives the process.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;

use crate::core::NewProcess;
use crate::core::ProcessChanges;
use crate::core::ProcessId;
use crate::core::ProcessRecord;
use crate::core::Timestamp;
use crate::core::YearlyMetrics;
use crate::interfaces::ListQuery;
use crate::interfaces::ProcessPage;
use crate::interfaces::ProcessStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Store
// ============================================================================

/// Mutable state shared behind the store mutex.
#[derive(Debug, Default)]
struct InMemoryState {
    /// Records keyed by raw identifier.
    records: BTreeMap<i64, ProcessRecord>,
    /// Last assigned identifier.
    last_id: i64,
}

/// In-memory process store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProcessStore {
    /// Record map and id counter protected by a mutex.
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryProcessStore {
    /// Creates a new empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(InMemoryState::default())),
        }
    }
}

/// Maps a poisoned-mutex failure to a store error.
fn poisoned() -> StoreError {
    StoreError::Io("process store mutex poisoned".to_string())
}

impl ProcessStore for InMemoryProcessStore {
    fn create(
        &self,
        new: &NewProcess,
        metrics: &YearlyMetrics,
    ) -> Result<ProcessRecord, StoreError> {
        let mut guard = self.state.lock().map_err(|_| poisoned())?;
        guard.last_id += 1;
        let now = Timestamp::now();
        let record = ProcessRecord {
            id: ProcessId::new(guard.last_id),
            email_id: new.email_id.clone(),
            department: new.department,
            process_name: new.process_name.clone(),
            description: new.description.clone(),
            apps_used: new.apps_used.clone(),
            frequency: new.frequency,
            duration: new.duration.clone(),
            volume: new.volume,
            yearly_volume: metrics.yearly_volume,
            yearly_duration: metrics.yearly_duration.clone(),
            process_status: new.process_status,
            documentation: new.documentation.clone(),
            created_at: now,
            updated_at: now,
        };
        guard.records.insert(record.id.get(), record.clone());
        Ok(record)
    }

    fn get(&self, id: ProcessId) -> Result<Option<ProcessRecord>, StoreError> {
        let guard = self.state.lock().map_err(|_| poisoned())?;
        Ok(guard.records.get(&id.get()).cloned())
    }

    fn list(&self, query: &ListQuery) -> Result<ProcessPage, StoreError> {
        let guard = self.state.lock().map_err(|_| poisoned())?;
        let matches = guard.records.values().filter(|record| {
            query.department.is_none_or(|department| record.department == department)
                && query.status.is_none_or(|status| record.process_status == status)
        });
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
        let mut total: u64 = 0;
        let mut processes = Vec::new();
        for record in matches {
            if total >= u64::from(query.skip) && processes.len() < limit {
                processes.push(record.clone());
            }
            total += 1;
        }
        Ok(ProcessPage { processes, total })
    }

    fn update(
        &self,
        id: ProcessId,
        changes: &ProcessChanges,
    ) -> Result<Option<ProcessRecord>, StoreError> {
        let mut guard = self.state.lock().map_err(|_| poisoned())?;
        let Some(existing) = guard.records.get(&id.get()) else {
            return Ok(None);
        };
        let mut merged = existing
            .with_changes(changes)
            .map_err(|err| StoreError::Invalid(err.to_string()))?;
        merged.updated_at = Timestamp::now();
        guard.records.insert(id.get(), merged.clone());
        Ok(Some(merged))
    }

    fn delete(&self, id: ProcessId) -> Result<bool, StoreError> {
        let mut guard = self.state.lock().map_err(|_| poisoned())?;
        Ok(guard.records.remove(&id.get()).is_some())
    }
}
