// crates/process-registry-core/src/core/record.rs
// ============================================================================
// Module: Process Record Model
// Description: The persisted process entity and its candidate input forms.
// Purpose: Separate raw submissions from normalized, store-ready records.
// Dependencies: crate::core::{fields, metrics}, serde
// ============================================================================

//! ## Overview
//! A [`ProcessRecord`] is the sole persisted entity. Inbound payloads arrive
//! as a [`ProcessDraft`] (full create) or [`ProcessPatch`] (partial update)
//! whose enum-backed fields are raw strings, so the validator owns rejection
//! and produces the complete violation list instead of serde request
//! binding. Validation normalizes drafts into [`NewProcess`] and patches
//! into [`ProcessChanges`] with typed fields.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;

use crate::core::fields::Department;
use crate::core::fields::Frequency;
use crate::core::fields::ProcessStatus;
use crate::core::metrics::CalculationError;
use crate::core::metrics::derive_yearly;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Store-assigned process record identifier.
///
/// # Invariants
/// - Assigned by the store on create; immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(i64);

impl ProcessId {
    /// Creates a process identifier from a raw store value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Store-assigned timestamp in unix seconds.
///
/// # Invariants
/// - Assigned by the store; `updated_at` is refreshed on every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from raw unix seconds.
    #[must_use]
    pub const fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Returns the wall clock as unix seconds.
    ///
    /// A clock before the unix epoch yields zero rather than panicking.
    #[must_use]
    pub fn now() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX));
        Self(seconds)
    }

    /// Returns the raw unix-seconds value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Persisted Record
// ============================================================================

/// A stored business-process record.
///
/// # Invariants
/// - `yearly_volume` and `yearly_duration` always agree with the current
///   `(volume, frequency, duration)` triple; mutations of any of the three
///   recompute both before persisting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Store-assigned identifier.
    pub id: ProcessId,
    /// Submitter email address.
    pub email_id: String,
    /// Owning department.
    pub department: Department,
    /// Process name (at most 25 characters).
    pub process_name: String,
    /// Optional description (at most 70 characters).
    pub description: Option<String>,
    /// Comma-separated approved application names, normalized.
    pub apps_used: String,
    /// Occurrence frequency.
    pub frequency: Frequency,
    /// Time per occurrence as `HH:MM` (hours <= 23).
    pub duration: String,
    /// Occurrences per frequency period (positive).
    pub volume: i64,
    /// Derived occurrences per year.
    pub yearly_volume: i64,
    /// Derived yearly time spent as `HH:MM` (hours unbounded).
    pub yearly_duration: String,
    /// Automation maturity status.
    pub process_status: ProcessStatus,
    /// Optional free-text documentation.
    pub documentation: Option<String>,
    /// Creation time, store-assigned.
    pub created_at: Timestamp,
    /// Last mutation time, store-refreshed.
    pub updated_at: Timestamp,
}

impl ProcessRecord {
    /// Returns a copy with `changes` applied and derived metrics refreshed.
    ///
    /// The derived fields are recomputed iff the change set touches
    /// `volume`, `frequency`, or `duration`; otherwise they are carried
    /// over unchanged. `updated_at` is left for the store to refresh.
    ///
    /// # Errors
    /// Returns [`CalculationError`] when recomputation fails; with validated
    /// inputs this indicates a validator/deriver contract mismatch.
    pub fn with_changes(&self, changes: &ProcessChanges) -> Result<Self, CalculationError> {
        let mut merged = self.clone();
        if let Some(email_id) = &changes.email_id {
            merged.email_id = email_id.clone();
        }
        if let Some(department) = changes.department {
            merged.department = department;
        }
        if let Some(process_name) = &changes.process_name {
            merged.process_name = process_name.clone();
        }
        if let Some(description) = &changes.description {
            merged.description = Some(description.clone());
        }
        if let Some(apps_used) = &changes.apps_used {
            merged.apps_used = apps_used.clone();
        }
        if let Some(frequency) = changes.frequency {
            merged.frequency = frequency;
        }
        if let Some(duration) = &changes.duration {
            merged.duration = duration.clone();
        }
        if let Some(volume) = changes.volume {
            merged.volume = volume;
        }
        if let Some(process_status) = changes.process_status {
            merged.process_status = process_status;
        }
        if let Some(documentation) = &changes.documentation {
            merged.documentation = Some(documentation.clone());
        }
        if changes.touches_metrics() {
            let metrics = derive_yearly(merged.volume, merged.frequency, &merged.duration)?;
            merged.yearly_volume = metrics.yearly_volume;
            merged.yearly_duration = metrics.yearly_duration;
        }
        Ok(merged)
    }
}

// ============================================================================
// SECTION: Candidate Inputs
// ============================================================================

/// Raw create payload prior to validation.
///
/// Enum-backed fields are strings here so the validator can report
/// `InvalidEnumValue` violations instead of serde rejecting the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDraft {
    /// Submitter email address.
    pub email_id: String,
    /// Department token (one of `AP`, `AR`, `GL`, `Payroll`).
    pub department: String,
    /// Process name.
    pub process_name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Comma-separated application names.
    pub apps_used: String,
    /// Frequency token (uppercase, underscore-separated).
    pub frequency: String,
    /// Time per occurrence as `HH:MM`.
    pub duration: String,
    /// Occurrences per frequency period.
    pub volume: i64,
    /// Status token (uppercase).
    pub process_status: String,
    /// Optional free-text documentation.
    #[serde(default)]
    pub documentation: Option<String>,
}

/// Raw partial-update payload prior to validation.
///
/// Absent fields are left untouched and are not re-validated. Supplying a
/// field always sets it; clearing an optional field is not supported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessPatch {
    /// Replacement email address.
    #[serde(default)]
    pub email_id: Option<String>,
    /// Replacement department token.
    #[serde(default)]
    pub department: Option<String>,
    /// Replacement process name.
    #[serde(default)]
    pub process_name: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Replacement comma-separated application names.
    #[serde(default)]
    pub apps_used: Option<String>,
    /// Replacement frequency token.
    #[serde(default)]
    pub frequency: Option<String>,
    /// Replacement duration as `HH:MM`.
    #[serde(default)]
    pub duration: Option<String>,
    /// Replacement volume.
    #[serde(default)]
    pub volume: Option<i64>,
    /// Replacement status token.
    #[serde(default)]
    pub process_status: Option<String>,
    /// Replacement documentation.
    #[serde(default)]
    pub documentation: Option<String>,
}

// ============================================================================
// SECTION: Normalized Inputs
// ============================================================================

/// A validated, normalized create payload ready for metric derivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProcess {
    /// Submitter email address.
    pub email_id: String,
    /// Owning department.
    pub department: Department,
    /// Process name (validated length).
    pub process_name: String,
    /// Optional description (validated length).
    pub description: Option<String>,
    /// Normalized comma-separated approved application names.
    pub apps_used: String,
    /// Occurrence frequency.
    pub frequency: Frequency,
    /// Time per occurrence as `HH:MM` (validated).
    pub duration: String,
    /// Occurrences per frequency period (validated positive).
    pub volume: i64,
    /// Automation maturity status.
    pub process_status: ProcessStatus,
    /// Optional free-text documentation.
    pub documentation: Option<String>,
}

/// A validated, normalized change set for a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessChanges {
    /// Replacement email address.
    pub email_id: Option<String>,
    /// Replacement department.
    pub department: Option<Department>,
    /// Replacement process name.
    pub process_name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement normalized application list.
    pub apps_used: Option<String>,
    /// Replacement frequency.
    pub frequency: Option<Frequency>,
    /// Replacement duration as `HH:MM`.
    pub duration: Option<String>,
    /// Replacement volume.
    pub volume: Option<i64>,
    /// Replacement status.
    pub process_status: Option<ProcessStatus>,
    /// Replacement documentation.
    pub documentation: Option<String>,
}

impl ProcessChanges {
    /// Returns `true` when no field is supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email_id.is_none()
            && self.department.is_none()
            && self.process_name.is_none()
            && self.description.is_none()
            && self.apps_used.is_none()
            && self.frequency.is_none()
            && self.duration.is_none()
            && self.volume.is_none()
            && self.process_status.is_none()
            && self.documentation.is_none()
    }

    /// Returns `true` when the change set requires metric recomputation.
    #[must_use]
    pub const fn touches_metrics(&self) -> bool {
        self.volume.is_some() || self.frequency.is_some() || self.duration.is_some()
    }
}
