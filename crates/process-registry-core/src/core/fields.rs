// crates/process-registry-core/src/core/fields.rs
// ============================================================================
// Module: Process Registry Field Types
// Description: Enumerated field values and duration helpers for process records.
// Purpose: Provide strongly typed field values with stable wire forms.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! This module defines the enumerated field values used throughout the
//! registry: departments, frequencies, and process statuses. Wire forms are
//! case-sensitive and fixed; parsing rejects anything that is not an exact
//! canonical token. The frequency-to-yearly-multiplier table lives here as a
//! `const fn` so it is immutable for the lifetime of the process.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Applications a process record may reference in `apps_used`.
pub const APPROVED_APPS: &[&str] = &[
    "ERP",
    "Excel",
    "Browser",
    "PDF",
    "Email",
    "Legacy Systems",
    "Reporting Tools",
];

// ============================================================================
// SECTION: Department
// ============================================================================

/// Department owning a process record.
///
/// # Invariants
/// - Wire tokens are exact and case-sensitive (`"AP"`, `"AR"`, `"GL"`, `"Payroll"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    /// Accounts payable.
    #[serde(rename = "AP")]
    Ap,
    /// Accounts receivable.
    #[serde(rename = "AR")]
    Ar,
    /// General ledger.
    #[serde(rename = "GL")]
    Gl,
    /// Payroll.
    #[serde(rename = "Payroll")]
    Payroll,
}

impl Department {
    /// All departments in canonical order.
    pub const ALL: [Self; 4] = [Self::Ap, Self::Ar, Self::Gl, Self::Payroll];

    /// Returns the canonical wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ap => "AP",
            Self::Ar => "AR",
            Self::Gl => "GL",
            Self::Payroll => "Payroll",
        }
    }

    /// Parses an exact canonical token (returns `None` otherwise).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|value| value.as_str() == token)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Frequency
// ============================================================================

/// How often a process occurs.
///
/// # Invariants
/// - Wire tokens are exact, uppercase, underscore-separated.
/// - The yearly multiplier table is fixed at compile time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    /// Every working day.
    Daily,
    /// Every week.
    Weekly,
    /// Every two weeks.
    BiWeekly,
    /// Every month.
    Monthly,
    /// Every quarter.
    Quarterly,
    /// Once per year.
    Yearly,
}

impl Frequency {
    /// All frequencies in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Daily,
        Self::Weekly,
        Self::BiWeekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Yearly,
    ];

    /// Returns the canonical wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::BiWeekly => "BI_WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Quarterly => "QUARTERLY",
            Self::Yearly => "YEARLY",
        }
    }

    /// Parses an exact canonical token (returns `None` otherwise).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|value| value.as_str() == token)
    }

    /// Returns the assumed number of periods per year for this frequency.
    ///
    /// DAILY assumes 220 working days; WEEKLY assumes 48 working weeks.
    #[must_use]
    pub const fn yearly_multiplier(self) -> i64 {
        match self {
            Self::Daily => 220,
            Self::Weekly => 48,
            Self::BiWeekly => 24,
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Yearly => 1,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Process Status
// ============================================================================

/// Automation maturity of a process.
///
/// # Invariants
/// - Wire tokens are exact, uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessStatus {
    /// No documented structure.
    Unstructured,
    /// Documented and repeatable.
    Standardized,
    /// Standardized and tuned.
    Optimized,
}

impl ProcessStatus {
    /// All statuses in canonical order.
    pub const ALL: [Self; 3] = [Self::Unstructured, Self::Standardized, Self::Optimized];

    /// Returns the canonical wire token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unstructured => "UNSTRUCTURED",
            Self::Standardized => "STANDARDIZED",
            Self::Optimized => "OPTIMIZED",
        }
    }

    /// Parses an exact canonical token (returns `None` otherwise).
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|value| value.as_str() == token)
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Duration Helpers
// ============================================================================

/// Reasons a `HH:MM` duration string is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DurationError {
    /// Input is not exactly two digits, a colon, and two digits.
    #[error("duration must be in HH:MM format")]
    Format,
    /// Hours exceed 23 or minutes exceed 59.
    #[error("duration hours must be <= 23 and minutes <= 59")]
    Range,
}

/// Parses a per-occurrence `HH:MM` duration into total minutes.
///
/// The shape check is strict: exactly two ASCII digits, a colon, and two
/// ASCII digits. `"9:00"` is a format error, not a range error.
///
/// # Errors
/// Returns [`DurationError::Format`] for malformed input and
/// [`DurationError::Range`] when hours > 23 or minutes > 59.
pub fn duration_minutes(raw: &str) -> Result<i64, DurationError> {
    let bytes = raw.as_bytes();
    if bytes.len() != 5
        || bytes[2] != b':'
        || !bytes[0].is_ascii_digit()
        || !bytes[1].is_ascii_digit()
        || !bytes[3].is_ascii_digit()
        || !bytes[4].is_ascii_digit()
    {
        return Err(DurationError::Format);
    }
    let hours = i64::from(bytes[0] - b'0') * 10 + i64::from(bytes[1] - b'0');
    let minutes = i64::from(bytes[3] - b'0') * 10 + i64::from(bytes[4] - b'0');
    if hours > 23 || minutes > 59 {
        return Err(DurationError::Range);
    }
    Ok(hours * 60 + minutes)
}

/// Formats total minutes as a zero-padded `HH:MM` duration string.
///
/// Hours are not clamped to 23; this is a duration, not a clock time.
#[must_use]
pub fn format_minutes(total_minutes: i64) -> String {
    format!("{:02}:{:02}", total_minutes / 60, total_minutes % 60)
}
