// crates/process-registry-core/src/core/mod.rs
// ============================================================================
// Module: Process Registry Core Model
// Description: Domain types, validation, and metric derivation.
// Purpose: Group the pure, framework-independent pieces of the registry.
// Dependencies: crate::core::{fields, metrics, record, validate}
// ============================================================================

//! ## Overview
//! The core model is pure: field enums and duration helpers, the record and
//! its candidate input forms, the validator, and the yearly-metrics deriver.
//! Nothing here touches storage or HTTP.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod fields;
pub mod metrics;
pub mod record;
pub mod validate;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use fields::APPROVED_APPS;
pub use fields::Department;
pub use fields::DurationError;
pub use fields::Frequency;
pub use fields::ProcessStatus;
pub use fields::duration_minutes;
pub use fields::format_minutes;
pub use metrics::CalculationError;
pub use metrics::YearlyMetrics;
pub use metrics::derive_yearly;
pub use record::NewProcess;
pub use record::ProcessChanges;
pub use record::ProcessDraft;
pub use record::ProcessId;
pub use record::ProcessPatch;
pub use record::ProcessRecord;
pub use record::Timestamp;
pub use validate::MAX_DESCRIPTION_CHARS;
pub use validate::MAX_PROCESS_NAME_CHARS;
pub use validate::Violation;
pub use validate::ViolationKind;
pub use validate::validate_draft;
pub use validate::validate_patch;
