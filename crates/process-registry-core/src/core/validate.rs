// crates/process-registry-core/src/core/validate.rs
// ============================================================================
// Module: Process Record Validator
// Description: Field-level business-rule validation for process submissions.
// Purpose: Normalize candidate records or report every violation at once.
// Dependencies: crate::core::{fields, record}, serde, thiserror
// ============================================================================

//! ## Overview
//! Validation is an explicit function, independent of any web framework's
//! request binding: given a raw [`ProcessDraft`] or [`ProcessPatch`], it
//! returns either a normalized, typed payload or the complete list of
//! field-level violations. All violations are collected in one pass; the
//! first failure never masks later ones. On a patch, absent fields are left
//! untouched and are not re-validated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::core::fields::APPROVED_APPS;
use crate::core::fields::Department;
use crate::core::fields::DurationError;
use crate::core::fields::Frequency;
use crate::core::fields::ProcessStatus;
use crate::core::fields::duration_minutes;
use crate::core::record::NewProcess;
use crate::core::record::ProcessChanges;
use crate::core::record::ProcessDraft;
use crate::core::record::ProcessPatch;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum process name length in characters.
pub const MAX_PROCESS_NAME_CHARS: usize = 25;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 70;
/// Maximum email local-part length in characters.
const MAX_EMAIL_LOCAL_CHARS: usize = 64;
/// Maximum email domain length in characters.
const MAX_EMAIL_DOMAIN_CHARS: usize = 255;
/// Maximum email domain label length in characters.
const MAX_EMAIL_LABEL_CHARS: usize = 63;
/// Characters permitted in an email local part besides ASCII alphanumerics.
const EMAIL_LOCAL_SPECIALS: &str = "!#$%&'*+-/=?^_`{|}~.";

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Classification of a field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Value does not match the required shape.
    #[error("invalid_format")]
    InvalidFormat,
    /// Value exceeds its maximum length.
    #[error("too_long")]
    TooLong,
    /// Numeric value lies outside its permitted range.
    #[error("out_of_range")]
    OutOfRange,
    /// Value is not one of the permitted enumerated tokens.
    #[error("invalid_enum_value")]
    InvalidEnumValue,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Record field that failed.
    pub field: &'static str,
    /// Failure classification.
    #[serde(rename = "code")]
    pub kind: ViolationKind,
    /// Human-readable reason.
    pub message: String,
}

impl Violation {
    /// Creates a violation for `field` with the given kind and message.
    fn new(field: &'static str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

// ============================================================================
// SECTION: Draft Validation
// ============================================================================

/// Validates a full create payload.
///
/// Returns the normalized [`NewProcess`] on success. `apps_used` tokens are
/// trimmed and re-joined with a single `", "` separator.
///
/// # Errors
/// Returns every violation found, in field order.
pub fn validate_draft(draft: &ProcessDraft) -> Result<NewProcess, Vec<Violation>> {
    let mut violations = Vec::new();

    if let Some(violation) = check_email(&draft.email_id) {
        violations.push(violation);
    }
    let department = parse_department(&draft.department, &mut violations);
    if let Some(violation) = check_length("process_name", &draft.process_name, MAX_PROCESS_NAME_CHARS)
    {
        violations.push(violation);
    }
    if let Some(description) = &draft.description
        && let Some(violation) = check_length("description", description, MAX_DESCRIPTION_CHARS)
    {
        violations.push(violation);
    }
    let apps_used = normalize_apps(&draft.apps_used, &mut violations);
    let frequency = parse_frequency(&draft.frequency, &mut violations);
    if let Some(violation) = check_duration(&draft.duration) {
        violations.push(violation);
    }
    if let Some(violation) = check_volume(draft.volume) {
        violations.push(violation);
    }
    let process_status = parse_status(&draft.process_status, &mut violations);

    match (department, apps_used, frequency, process_status) {
        (Some(department), Some(apps_used), Some(frequency), Some(process_status))
            if violations.is_empty() =>
        {
            Ok(NewProcess {
                email_id: draft.email_id.clone(),
                department,
                process_name: draft.process_name.clone(),
                description: draft.description.clone(),
                apps_used,
                frequency,
                duration: draft.duration.clone(),
                volume: draft.volume,
                process_status,
                documentation: draft.documentation.clone(),
            })
        }
        _ => Err(violations),
    }
}

// ============================================================================
// SECTION: Patch Validation
// ============================================================================

/// Validates a partial update payload.
///
/// Only supplied fields are checked and normalized; absent fields do not
/// appear in the returned [`ProcessChanges`].
///
/// # Errors
/// Returns every violation found among the supplied fields, in field order.
pub fn validate_patch(patch: &ProcessPatch) -> Result<ProcessChanges, Vec<Violation>> {
    let mut violations = Vec::new();
    let mut changes = ProcessChanges::default();

    if let Some(email_id) = &patch.email_id {
        match check_email(email_id) {
            Some(violation) => violations.push(violation),
            None => changes.email_id = Some(email_id.clone()),
        }
    }
    if let Some(token) = &patch.department {
        changes.department = parse_department(token, &mut violations);
    }
    if let Some(process_name) = &patch.process_name {
        match check_length("process_name", process_name, MAX_PROCESS_NAME_CHARS) {
            Some(violation) => violations.push(violation),
            None => changes.process_name = Some(process_name.clone()),
        }
    }
    if let Some(description) = &patch.description {
        match check_length("description", description, MAX_DESCRIPTION_CHARS) {
            Some(violation) => violations.push(violation),
            None => changes.description = Some(description.clone()),
        }
    }
    if let Some(apps_used) = &patch.apps_used {
        changes.apps_used = normalize_apps(apps_used, &mut violations);
    }
    if let Some(token) = &patch.frequency {
        changes.frequency = parse_frequency(token, &mut violations);
    }
    if let Some(duration) = &patch.duration {
        match check_duration(duration) {
            Some(violation) => violations.push(violation),
            None => changes.duration = Some(duration.clone()),
        }
    }
    if let Some(volume) = patch.volume {
        match check_volume(volume) {
            Some(violation) => violations.push(violation),
            None => changes.volume = Some(volume),
        }
    }
    if let Some(token) = &patch.process_status {
        changes.process_status = parse_status(token, &mut violations);
    }
    if let Some(documentation) = &patch.documentation {
        changes.documentation = Some(documentation.clone());
    }

    if violations.is_empty() {
        Ok(changes)
    } else {
        Err(violations)
    }
}

// ============================================================================
// SECTION: Field Checks
// ============================================================================

/// Checks email syntax; returns a violation on failure.
fn check_email(raw: &str) -> Option<Violation> {
    if is_well_formed_email(raw) {
        None
    } else {
        Some(Violation::new(
            "email_id",
            ViolationKind::InvalidFormat,
            format!("'{raw}' is not a valid email address"),
        ))
    }
}

/// Returns `true` when `raw` is syntactically an email address.
///
/// Deliberately a syntax check only: one `@`, an RFC-atext-shaped local
/// part without leading/trailing/consecutive dots, and a dotted domain of
/// alphanumeric-or-hyphen labels. No DNS or deliverability checks.
fn is_well_formed_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }
    if local.is_empty() || local.chars().count() > MAX_EMAIL_LOCAL_CHARS {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || EMAIL_LOCAL_SPECIALS.contains(c))
    {
        return false;
    }
    if domain.chars().count() > MAX_EMAIL_DOMAIN_CHARS || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && label.chars().count() <= MAX_EMAIL_LABEL_CHARS
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

/// Checks a string length bound in characters; returns a violation on failure.
fn check_length(field: &'static str, value: &str, max_chars: usize) -> Option<Violation> {
    if value.chars().count() > max_chars {
        Some(Violation::new(
            field,
            ViolationKind::TooLong,
            format!("must be at most {max_chars} characters"),
        ))
    } else {
        None
    }
}

/// Checks `HH:MM` duration shape and range; returns a violation on failure.
fn check_duration(raw: &str) -> Option<Violation> {
    match duration_minutes(raw) {
        Ok(_) => None,
        Err(DurationError::Format) => Some(Violation::new(
            "duration",
            ViolationKind::InvalidFormat,
            "duration must be in HH:MM format",
        )),
        Err(DurationError::Range) => Some(Violation::new(
            "duration",
            ViolationKind::OutOfRange,
            "duration hours must be <= 23 and minutes <= 59",
        )),
    }
}

/// Checks volume positivity; returns a violation on failure.
fn check_volume(volume: i64) -> Option<Violation> {
    if volume > 0 {
        None
    } else {
        Some(Violation::new(
            "volume",
            ViolationKind::OutOfRange,
            "volume must be greater than zero",
        ))
    }
}

/// Splits, trims, and re-joins the application list.
///
/// Every token not on the approved list is reported in a single violation
/// naming all offenders, not just the first.
fn normalize_apps(raw: &str, violations: &mut Vec<Violation>) -> Option<String> {
    let tokens: Vec<&str> = raw.split(',').map(str::trim).collect();
    let unknown: Vec<&str> = tokens
        .iter()
        .copied()
        .filter(|token| !APPROVED_APPS.contains(token))
        .collect();
    if unknown.is_empty() {
        Some(tokens.join(", "))
    } else {
        violations.push(Violation::new(
            "apps_used",
            ViolationKind::InvalidEnumValue,
            format!("Invalid apps: {}", unknown.join(", ")),
        ));
        None
    }
}

/// Parses a department token, recording a violation on failure.
fn parse_department(token: &str, violations: &mut Vec<Violation>) -> Option<Department> {
    Department::from_token(token).or_else(|| {
        violations.push(enum_violation("department", token, &Department::ALL.map(Department::as_str)));
        None
    })
}

/// Parses a frequency token, recording a violation on failure.
fn parse_frequency(token: &str, violations: &mut Vec<Violation>) -> Option<Frequency> {
    Frequency::from_token(token).or_else(|| {
        violations.push(enum_violation("frequency", token, &Frequency::ALL.map(Frequency::as_str)));
        None
    })
}

/// Parses a status token, recording a violation on failure.
fn parse_status(token: &str, violations: &mut Vec<Violation>) -> Option<ProcessStatus> {
    ProcessStatus::from_token(token).or_else(|| {
        violations.push(enum_violation(
            "process_status",
            token,
            &ProcessStatus::ALL.map(ProcessStatus::as_str),
        ));
        None
    })
}

/// Builds an `InvalidEnumValue` violation listing the permitted tokens.
fn enum_violation(field: &'static str, token: &str, allowed: &[&str]) -> Violation {
    Violation::new(
        field,
        ViolationKind::InvalidEnumValue,
        format!("'{token}' is not one of: {}", allowed.join(", ")),
    )
}
