// crates/process-registry-core/tests/memory_store.rs
// ============================================================================
// Module: In-Memory Store Tests
// Description: Conformance tests for the in-memory process store.
// Purpose: Pin store contract behavior shared with durable backends.
// Dependencies: process-registry-core
// ============================================================================

//! ## Overview
//! Exercises the [`process_registry_core::ProcessStore`] contract against
//! the in-memory reference implementation: id assignment, pagination and
//! filtering, metric recomputation on update, and not-found signalling.

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

use process_registry_core::Department;
use process_registry_core::Frequency;
use process_registry_core::InMemoryProcessStore;
use process_registry_core::ListQuery;
use process_registry_core::NewProcess;
use process_registry_core::ProcessChanges;
use process_registry_core::ProcessId;
use process_registry_core::ProcessStatus;
use process_registry_core::ProcessStore;
use process_registry_core::derive_yearly;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a validated create payload with the given name and department.
fn new_process(name: &str, department: Department) -> NewProcess {
    NewProcess {
        email_id: "clerk@example.com".to_string(),
        department,
        process_name: name.to_string(),
        description: None,
        apps_used: "ERP".to_string(),
        frequency: Frequency::Monthly,
        duration: "00:10".to_string(),
        volume: 1,
        process_status: ProcessStatus::Unstructured,
        documentation: None,
    }
}

/// Creates a record through the full derive-then-create path.
fn create(store: &InMemoryProcessStore, name: &str, department: Department) -> ProcessId {
    let new = new_process(name, department);
    let metrics = derive_yearly(new.volume, new.frequency, &new.duration).expect("derive");
    store.create(&new, &metrics).expect("create").id
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Create assigns increasing ids and fills derived fields and timestamps.
#[test]
fn create_assigns_ids_and_metrics() {
    let store = InMemoryProcessStore::new();
    let first = create(&store, "first", Department::Ap);
    let second = create(&store, "second", Department::Ar);
    assert!(second > first);

    let record = store.get(first).expect("get").expect("present");
    assert_eq!(record.yearly_volume, 12);
    assert_eq!(record.yearly_duration, "02:00");
    assert_eq!(record.created_at, record.updated_at);
}

/// Get returns `None` for an id that was never assigned.
#[test]
fn get_missing_returns_none() {
    let store = InMemoryProcessStore::new();
    assert!(store.get(ProcessId::new(42)).expect("get").is_none());
}

/// List paginates in stable ascending-id order and reports filter totals.
#[test]
fn list_paginates_and_filters() {
    let store = InMemoryProcessStore::new();
    for index in 0..5 {
        create(&store, &format!("ap-{index}"), Department::Ap);
    }
    create(&store, "gl-0", Department::Gl);

    let page = store
        .list(&ListQuery {
            skip: 1,
            limit: 2,
            department: Some(Department::Ap),
            status: None,
        })
        .expect("list");
    assert_eq!(page.total, 5);
    let names: Vec<&str> =
        page.processes.iter().map(|record| record.process_name.as_str()).collect();
    assert_eq!(names, vec!["ap-1", "ap-2"]);

    let all = store.list(&ListQuery::default()).expect("list");
    assert_eq!(all.total, 6);
    assert_eq!(all.processes.len(), 6);
}

/// A status-only update leaves derived metrics untouched.
#[test]
fn status_update_preserves_metrics() {
    let store = InMemoryProcessStore::new();
    let id = create(&store, "proc", Department::Ap);
    let before = store.get(id).expect("get").expect("present");

    let changes = ProcessChanges {
        process_status: Some(ProcessStatus::Optimized),
        ..ProcessChanges::default()
    };
    let after = store.update(id, &changes).expect("update").expect("present");
    assert_eq!(after.process_status, ProcessStatus::Optimized);
    assert_eq!(after.yearly_volume, before.yearly_volume);
    assert_eq!(after.yearly_duration, before.yearly_duration);
}

/// A volume-only update recomputes both derived fields.
#[test]
fn volume_update_recomputes_metrics() {
    let store = InMemoryProcessStore::new();
    let id = create(&store, "proc", Department::Ap);

    let changes = ProcessChanges {
        volume: Some(2),
        ..ProcessChanges::default()
    };
    let after = store.update(id, &changes).expect("update").expect("present");
    assert_eq!(after.yearly_volume, 24);
    assert_eq!(after.yearly_duration, "04:00");
}

/// Updating a missing record reports `None`, not an error.
#[test]
fn update_missing_returns_none() {
    let store = InMemoryProcessStore::new();
    let outcome = store.update(ProcessId::new(9), &ProcessChanges::default()).expect("update");
    assert!(outcome.is_none());
}

/// Delete reports whether a record existed.
#[test]
fn delete_signals_presence() {
    let store = InMemoryProcessStore::new();
    let id = create(&store, "proc", Department::Ap);
    assert!(store.delete(id).expect("delete"));
    assert!(!store.delete(id).expect("delete"));
    assert!(store.get(id).expect("get").is_none());
}
