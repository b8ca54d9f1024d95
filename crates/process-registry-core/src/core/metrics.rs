// crates/process-registry-core/src/core/metrics.rs
// ============================================================================
// Module: Yearly Metrics Deriver
// Description: Pure derivation of yearly volume and duration from a record.
// Purpose: Keep derived fields consistent with (volume, frequency, duration).
// Dependencies: crate::core::fields, serde, thiserror
// ============================================================================

//! ## Overview
//! [`derive_yearly`] is a pure, deterministic function from
//! `(volume, frequency, duration)` to `(yearly_volume, yearly_duration)`.
//! The validator guarantees parseable input on every call path, so the
//! error branch here is a defensive fallback: hitting it means the
//! validator and deriver contracts have drifted apart.
//!
//! Yearly duration is rounded to the nearest multiple of five minutes.
//! Total minutes is integral, so `total / 5` can never land exactly on a
//! `.5` boundary and round-half-to-even agrees with round-half-up at every
//! reachable input; the implementation uses plain integer nearest rounding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::fields::Frequency;
use crate::core::fields::duration_minutes;
use crate::core::fields::format_minutes;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure while deriving yearly metrics.
///
/// Distinct from validator violations: surfacing one of these means the
/// deriver received input the validator should already have rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculationError {
    /// Duration string could not be parsed as `HH:MM`.
    #[error("cannot derive yearly metrics: unparseable duration {0:?}")]
    UnparseableDuration(String),
    /// Multiplication overflowed the metric range.
    #[error("cannot derive yearly metrics: arithmetic overflow")]
    Overflow,
}

// ============================================================================
// SECTION: Derivation
// ============================================================================

/// Derived yearly metrics for a process record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyMetrics {
    /// Total occurrences per year.
    pub yearly_volume: i64,
    /// Total yearly time spent as `HH:MM`, rounded to the nearest 5 minutes.
    pub yearly_duration: String,
}

/// Derives `(yearly_volume, yearly_duration)` from the record triple.
///
/// `yearly_volume` is `volume` multiplied by the fixed per-frequency
/// multiplier table ([`Frequency::yearly_multiplier`]). Yearly minutes are
/// per-occurrence minutes times `yearly_volume`, rounded to the nearest
/// multiple of five, then formatted as `HH:MM` with unbounded hours.
///
/// Deterministic and idempotent for all valid inputs. Callers must supply a
/// positive `volume`; the validator enforces this upstream.
///
/// # Errors
/// Returns [`CalculationError`] when `duration` does not parse as `HH:MM`
/// or the multiplication overflows.
pub fn derive_yearly(
    volume: i64,
    frequency: Frequency,
    duration: &str,
) -> Result<YearlyMetrics, CalculationError> {
    let per_occurrence_minutes = duration_minutes(duration)
        .map_err(|_| CalculationError::UnparseableDuration(duration.to_string()))?;
    let yearly_volume = volume
        .checked_mul(frequency.yearly_multiplier())
        .ok_or(CalculationError::Overflow)?;
    let total_minutes = per_occurrence_minutes
        .checked_mul(yearly_volume)
        .ok_or(CalculationError::Overflow)?;
    let rounded_minutes = round_to_nearest_five(total_minutes);
    Ok(YearlyMetrics {
        yearly_volume,
        yearly_duration: format_minutes(rounded_minutes),
    })
}

/// Rounds non-negative total minutes to the nearest multiple of five.
///
/// The remainder of an integral total is in `0..=4`, so a true `.5` tie is
/// unreachable and nearest rounding is unambiguous.
const fn round_to_nearest_five(total_minutes: i64) -> i64 {
    let remainder = total_minutes % 5;
    if remainder >= 3 {
        total_minutes - remainder + 5
    } else {
        total_minutes - remainder
    }
}
