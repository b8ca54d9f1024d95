// crates/process-registry-core/tests/fields.rs
// ============================================================================
// Module: Field Type Tests
// Description: Tests for enumerated field wire forms and duration helpers.
// Purpose: Ensure tokens round-trip through serde and parse exactly.
// Dependencies: process-registry-core, serde_json
// ============================================================================

//! ## Overview
//! Validates that enumerated field values keep their canonical wire tokens
//! through serde and `Display`, and that the duration helpers enforce the
//! strict `HH:MM` shape.

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
use process_registry_core::DurationError;
use process_registry_core::Frequency;
use process_registry_core::ProcessStatus;
use process_registry_core::duration_minutes;
use process_registry_core::format_minutes;

/// Asserts a field enum value round-trips through serde and `Display`.
macro_rules! assert_token_roundtrip {
    ($ty:ty, $value:expr, $token:expr) => {{
        assert_eq!($value.as_str(), $token);
        assert_eq!($value.to_string(), $token);
        let json = serde_json::to_string(&$value).expect("serialize");
        assert_eq!(json, format!("\"{}\"", $token));
        let decoded: $ty = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(decoded, $value);
        assert_eq!(<$ty>::from_token($token), Some($value));
    }};
}

/// Verifies canonical tokens for every enumerated field value.
#[test]
fn tokens_roundtrip_with_serde_and_display() {
    assert_token_roundtrip!(Department, Department::Ap, "AP");
    assert_token_roundtrip!(Department, Department::Ar, "AR");
    assert_token_roundtrip!(Department, Department::Gl, "GL");
    assert_token_roundtrip!(Department, Department::Payroll, "Payroll");
    assert_token_roundtrip!(Frequency, Frequency::BiWeekly, "BI_WEEKLY");
    assert_token_roundtrip!(Frequency, Frequency::Quarterly, "QUARTERLY");
    assert_token_roundtrip!(ProcessStatus, ProcessStatus::Standardized, "STANDARDIZED");
}

/// Token parsing is exact; near misses return `None`.
#[test]
fn near_miss_tokens_do_not_parse() {
    assert_eq!(Department::from_token("payroll"), None);
    assert_eq!(Department::from_token("PAYROLL"), None);
    assert_eq!(Frequency::from_token("BI-WEEKLY"), None);
    assert_eq!(Frequency::from_token("daily"), None);
    assert_eq!(ProcessStatus::from_token("Optimized"), None);
}

/// Duration parsing enforces strict shape before range.
#[test]
fn duration_parsing_is_strict() {
    assert_eq!(duration_minutes("00:00"), Ok(0));
    assert_eq!(duration_minutes("23:59"), Ok(23 * 60 + 59));
    assert_eq!(duration_minutes("01:30"), Ok(90));
    assert_eq!(duration_minutes("9:00"), Err(DurationError::Format));
    assert_eq!(duration_minutes("0900"), Err(DurationError::Format));
    assert_eq!(duration_minutes("09:0a"), Err(DurationError::Format));
    assert_eq!(duration_minutes(""), Err(DurationError::Format));
    assert_eq!(duration_minutes("24:00"), Err(DurationError::Range));
    assert_eq!(duration_minutes("00:60"), Err(DurationError::Range));
}

/// Formatting zero-pads and leaves hours unbounded.
#[test]
fn formatting_pads_and_keeps_unbounded_hours() {
    assert_eq!(format_minutes(0), "00:00");
    assert_eq!(format_minutes(65), "01:05");
    assert_eq!(format_minutes(4620), "77:00");
    assert_eq!(format_minutes(220 * 60), "220:00");
}
