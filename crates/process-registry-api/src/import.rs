// crates/process-registry-api/src/import.rs
// ============================================================================
// Module: CSV Import
// Description: Bulk process import from uploaded CSV files.
// Purpose: Map spreadsheet rows through the validation pipeline per row.
// Dependencies: csv, process-registry-core
// ============================================================================

//! ## Overview
//! CSV import is row-independent: each data row runs the full
//! validate-derive-create pipeline on its own, and a failing row is recorded
//! and skipped without affecting its neighbors. Only structural problems
//! fail the whole upload: a header missing a required column, or input the
//! CSV reader cannot frame at all.
//!
//! Row numbers in error messages are physical file line numbers, with the
//! header on line 1, so they match what the submitter sees in a spreadsheet.

// ============================================================================
// SECTION: Imports
// ============================================================================

use csv::ReaderBuilder;
use csv::StringRecord;
use process_registry_core::ProcessDraft;
use process_registry_core::ProcessStore;
use process_registry_core::derive_yearly;
use process_registry_core::validate_draft;
use serde::Serialize;

use crate::error::ApiError;

// ============================================================================
// SECTION: Columns
// ============================================================================

/// Header names that must be present in every upload.
const REQUIRED_COLUMNS: [&str; 8] = [
    "Email ID",
    "Team",
    "Process Name",
    "Apps Used",
    "Frequency",
    "Duration",
    "Volume",
    "Process Status",
];

/// Resolved column indexes for one upload.
struct ColumnMap {
    /// `Email ID` column.
    email_id: usize,
    /// `Team` column (maps to department).
    team: usize,
    /// `Process Name` column.
    process_name: usize,
    /// Optional `Description` column.
    description: Option<usize>,
    /// `Apps Used` column.
    apps_used: usize,
    /// `Frequency` column.
    frequency: usize,
    /// `Duration` column.
    duration: usize,
    /// `Volume` column.
    volume: usize,
    /// `Process Status` column.
    process_status: usize,
    /// Optional `Documentation` column.
    documentation: Option<usize>,
}

impl ColumnMap {
    /// Resolves column positions from the header row.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::BadRequest`] naming the first missing required
    /// column.
    fn from_headers(headers: &StringRecord) -> Result<Self, ApiError> {
        let find = |name: &str| headers.iter().position(|header| header == name);
        for name in REQUIRED_COLUMNS {
            if find(name).is_none() {
                return Err(ApiError::BadRequest(format!("Missing required column: {name}")));
            }
        }
        // Required lookups cannot fail past the loop above.
        let require = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            email_id: require("Email ID"),
            team: require("Team"),
            process_name: require("Process Name"),
            description: find("Description"),
            apps_used: require("Apps Used"),
            frequency: require("Frequency"),
            duration: require("Duration"),
            volume: require("Volume"),
            process_status: require("Process Status"),
            documentation: find("Documentation"),
        })
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Outcome of one CSV import.
#[derive(Debug, Default, Serialize)]
pub struct ImportReport {
    /// Rows imported successfully.
    pub success_count: u64,
    /// Rows rejected.
    pub error_count: u64,
    /// One message per rejected row, in file order.
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Records a rejected row.
    fn reject(&mut self, line: u64, reason: &str) {
        self.error_count += 1;
        self.errors.push(format!("Row {line}: {reason}"));
    }
}

// ============================================================================
// SECTION: Import
// ============================================================================

/// Imports every data row of the given CSV text into the store.
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] when the header is missing a required
/// column. Individual row failures are reported in the returned
/// [`ImportReport`], not as errors.
pub fn import_csv(store: &dyn ProcessStore, text: &str) -> Result<ImportReport, ApiError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|err| ApiError::BadRequest(format!("Unreadable CSV header: {err}")))?
        .clone();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut report = ImportReport::default();
    for outcome in reader.records() {
        let record = match outcome {
            Ok(record) => record,
            Err(err) => {
                let line = err.position().map_or(0, csv::Position::line);
                report.reject(line, &err.to_string());
                continue;
            }
        };
        let line = record.position().map_or(0, csv::Position::line);
        match import_row(store, &columns, &record) {
            Ok(()) => report.success_count += 1,
            Err(reason) => report.reject(line, &reason),
        }
    }
    Ok(report)
}

/// Runs one data row through the validate-derive-create pipeline.
fn import_row(
    store: &dyn ProcessStore,
    columns: &ColumnMap,
    record: &StringRecord,
) -> Result<(), String> {
    let cell = |index: usize| record.get(index).unwrap_or("");
    let optional_cell = |index: Option<usize>| {
        index
            .and_then(|position| record.get(position))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    let volume_cell = cell(columns.volume).trim();
    let volume: i64 = volume_cell
        .parse()
        .map_err(|_| format!("invalid volume: {volume_cell}"))?;

    let draft = ProcessDraft {
        email_id: cell(columns.email_id).trim().to_string(),
        department: cell(columns.team).trim().to_string(),
        process_name: cell(columns.process_name).trim().to_string(),
        description: optional_cell(columns.description),
        apps_used: cell(columns.apps_used).to_string(),
        frequency: normalize_frequency(cell(columns.frequency)),
        duration: cell(columns.duration).trim().to_string(),
        volume,
        process_status: cell(columns.process_status).trim().to_string(),
        documentation: optional_cell(columns.documentation),
    };

    let new = validate_draft(&draft).map_err(|violations| {
        violations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    })?;
    let metrics =
        derive_yearly(new.volume, new.frequency, &new.duration).map_err(|err| err.to_string())?;
    store.create(&new, &metrics).map_err(|err| err.to_string())?;
    Ok(())
}

/// Normalizes a frequency cell to the canonical token form.
fn normalize_frequency(cell: &str) -> String {
    cell.trim().to_uppercase().replace(['-', ' '], "_")
}

// ============================================================================
// SECTION: Tests
// ============================================================================
