// crates/process-registry-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Process Store
// Description: Durable ProcessStore backed by a single SQLite database.
// Purpose: Persist process records with schema-enforced business rules.
// Dependencies: process-registry-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`ProcessStore`] using `SQLite`. One
//! `processes` table holds every record; CHECK constraints mirror the
//! validator's length, enum, shape, and positivity rules, and an
//! `AFTER UPDATE` trigger refreshes `updated_at` on every mutation. Store
//! access is serialized through a mutexed connection; each operation is a
//! single round trip inside one guard scope, released on every exit path.
//!
//! The update path owns the derived-metrics invariant: when a change set
//! touches `volume`, `frequency`, or `duration`, the merged record's
//! `yearly_volume` and `yearly_duration` are recomputed before the write.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use process_registry_core::Department;
use process_registry_core::Frequency;
use process_registry_core::ListQuery;
use process_registry_core::NewProcess;
use process_registry_core::ProcessChanges;
use process_registry_core::ProcessId;
use process_registry_core::ProcessPage;
use process_registry_core::ProcessRecord;
use process_registry_core::ProcessStatus;
use process_registry_core::ProcessStore;
use process_registry_core::StoreError;
use process_registry_core::Timestamp;
use process_registry_core::YearlyMetrics;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Column list shared by every record-returning statement.
const RECORD_COLUMNS: &str = "id, email_id, department, process_name, description, apps_used, \
                              frequency, duration, volume, yearly_volume, yearly_duration, \
                              process_status, documentation, created_at, updated_at";

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteJournalMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteJournalMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` process store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteJournalMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Returns a config with defaults for the given database path.
    #[must_use]
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteJournalMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
///
/// # Invariants
/// - Error messages avoid embedding full record payloads.
#[derive(Debug, Error, Clone)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Stored row violates the record model.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data or request.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Db(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) | SqliteStoreError::Invalid(message) => {
                Self::Invalid(message)
            }
        }
    }
}

/// Maps a `rusqlite` error to a store error.
fn db_err(error: &rusqlite::Error) -> SqliteStoreError {
    SqliteStoreError::Db(error.to_string())
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed process store.
///
/// # Invariants
/// - `SQLite` connection access is serialized through a mutex.
/// - Derived metrics are recomputed before any write that changes the
///   `(volume, frequency, duration)` triple.
#[derive(Clone)]
pub struct SqliteProcessStore {
    /// Shared connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteProcessStore {
    /// Opens an `SQLite`-backed process store.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Verifies the store can execute a simple SQL statement.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] if the mutex is poisoned or the query
    /// fails.
    pub fn check_connection(&self) -> Result<(), SqliteStoreError> {
        let guard = self.lock()?;
        let _: i64 = guard
            .query_row("SELECT 1", [], |row| row.get(0))
            .map_err(|err| db_err(&err))?;
        Ok(())
    }

    /// Locks the shared connection.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqliteStoreError::Io("sqlite connection mutex poisoned".to_string()))
    }
}

// ============================================================================
// SECTION: Row Mapping
// ============================================================================

/// Raw row image before enum token parsing.
struct RawRow {
    /// Record identifier.
    id: i64,
    /// Submitter email address.
    email_id: String,
    /// Department token.
    department: String,
    /// Process name.
    process_name: String,
    /// Optional description.
    description: Option<String>,
    /// Normalized application list.
    apps_used: String,
    /// Frequency token.
    frequency: String,
    /// Per-occurrence duration.
    duration: String,
    /// Occurrences per period.
    volume: i64,
    /// Derived yearly occurrences.
    yearly_volume: i64,
    /// Derived yearly duration.
    yearly_duration: String,
    /// Status token.
    process_status: String,
    /// Optional documentation.
    documentation: Option<String>,
    /// Creation time (unix seconds).
    created_at: i64,
    /// Last mutation time (unix seconds).
    updated_at: i64,
}

impl RawRow {
    /// Extracts a raw row from a `rusqlite` result row.
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            email_id: row.get(1)?,
            department: row.get(2)?,
            process_name: row.get(3)?,
            description: row.get(4)?,
            apps_used: row.get(5)?,
            frequency: row.get(6)?,
            duration: row.get(7)?,
            volume: row.get(8)?,
            yearly_volume: row.get(9)?,
            yearly_duration: row.get(10)?,
            process_status: row.get(11)?,
            documentation: row.get(12)?,
            created_at: row.get(13)?,
            updated_at: row.get(14)?,
        })
    }

    /// Converts the raw row into a typed record, failing closed on tokens
    /// the model does not recognize.
    fn into_record(self) -> Result<ProcessRecord, SqliteStoreError> {
        let department = Department::from_token(&self.department).ok_or_else(|| {
            SqliteStoreError::Corrupt(format!("unknown department token: {}", self.department))
        })?;
        let frequency = Frequency::from_token(&self.frequency).ok_or_else(|| {
            SqliteStoreError::Corrupt(format!("unknown frequency token: {}", self.frequency))
        })?;
        let process_status = ProcessStatus::from_token(&self.process_status).ok_or_else(|| {
            SqliteStoreError::Corrupt(format!("unknown status token: {}", self.process_status))
        })?;
        Ok(ProcessRecord {
            id: ProcessId::new(self.id),
            email_id: self.email_id,
            department,
            process_name: self.process_name,
            description: self.description,
            apps_used: self.apps_used,
            frequency,
            duration: self.duration,
            volume: self.volume,
            yearly_volume: self.yearly_volume,
            yearly_duration: self.yearly_duration,
            process_status,
            documentation: self.documentation,
            created_at: Timestamp::from_unix_seconds(self.created_at),
            updated_at: Timestamp::from_unix_seconds(self.updated_at),
        })
    }
}

/// Fetches one record by id inside an existing guard scope.
fn fetch_record(
    connection: &Connection,
    id: ProcessId,
) -> Result<Option<ProcessRecord>, SqliteStoreError> {
    let raw = connection
        .query_row(
            &format!("SELECT {RECORD_COLUMNS} FROM processes WHERE id = ?1"),
            params![id.get()],
            RawRow::from_row,
        )
        .optional()
        .map_err(|err| db_err(&err))?;
    raw.map(RawRow::into_record).transpose()
}

// ============================================================================
// SECTION: Store Trait
// ============================================================================

impl ProcessStore for SqliteProcessStore {
    fn create(
        &self,
        new: &NewProcess,
        metrics: &YearlyMetrics,
    ) -> Result<ProcessRecord, StoreError> {
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO processes (email_id, department, process_name, description, \
                 apps_used, frequency, duration, volume, yearly_volume, yearly_duration, \
                 process_status, documentation)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    new.email_id,
                    new.department.as_str(),
                    new.process_name,
                    new.description,
                    new.apps_used,
                    new.frequency.as_str(),
                    new.duration,
                    new.volume,
                    metrics.yearly_volume,
                    metrics.yearly_duration,
                    new.process_status.as_str(),
                    new.documentation,
                ],
            )
            .map_err(|err| db_err(&err))?;
        let id = ProcessId::new(guard.last_insert_rowid());
        let record = fetch_record(&guard, id)?.ok_or_else(|| {
            SqliteStoreError::Corrupt(format!("created row {id} is not readable"))
        })?;
        Ok(record)
    }

    fn get(&self, id: ProcessId) -> Result<Option<ProcessRecord>, StoreError> {
        let guard = self.lock()?;
        Ok(fetch_record(&guard, id)?)
    }

    fn list(&self, query: &ListQuery) -> Result<ProcessPage, StoreError> {
        let guard = self.lock()?;
        let mut clauses: Vec<&str> = Vec::new();
        let mut filter_params: Vec<Value> = Vec::new();
        if let Some(department) = query.department {
            clauses.push("department = ?");
            filter_params.push(Value::Text(department.as_str().to_string()));
        }
        if let Some(status) = query.status {
            clauses.push("process_status = ?");
            filter_params.push(Value::Text(status.as_str().to_string()));
        }
        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", clauses.join(" AND "))
        };

        let total: i64 = guard
            .query_row(
                &format!("SELECT COUNT(1) FROM processes{where_sql}"),
                params_from_iter(filter_params.iter()),
                |row| row.get(0),
            )
            .map_err(|err| db_err(&err))?;

        let mut page_params = filter_params;
        page_params.push(Value::Integer(i64::from(query.limit)));
        page_params.push(Value::Integer(i64::from(query.skip)));
        let mut statement = guard
            .prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM processes{where_sql} \
                 ORDER BY id ASC LIMIT ? OFFSET ?"
            ))
            .map_err(|err| db_err(&err))?;
        let rows = statement
            .query_map(params_from_iter(page_params.iter()), RawRow::from_row)
            .map_err(|err| db_err(&err))?;
        let mut processes = Vec::new();
        for raw in rows {
            let raw = raw.map_err(|err| db_err(&err))?;
            processes.push(raw.into_record()?);
        }
        Ok(ProcessPage {
            processes,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    fn update(
        &self,
        id: ProcessId,
        changes: &ProcessChanges,
    ) -> Result<Option<ProcessRecord>, StoreError> {
        let guard = self.lock()?;
        let Some(existing) = fetch_record(&guard, id)? else {
            return Ok(None);
        };
        let merged = existing
            .with_changes(changes)
            .map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
        guard
            .execute(
                "UPDATE processes SET email_id = ?1, department = ?2, process_name = ?3, \
                 description = ?4, apps_used = ?5, frequency = ?6, duration = ?7, volume = ?8, \
                 yearly_volume = ?9, yearly_duration = ?10, process_status = ?11, \
                 documentation = ?12
                 WHERE id = ?13",
                params![
                    merged.email_id,
                    merged.department.as_str(),
                    merged.process_name,
                    merged.description,
                    merged.apps_used,
                    merged.frequency.as_str(),
                    merged.duration,
                    merged.volume,
                    merged.yearly_volume,
                    merged.yearly_duration,
                    merged.process_status.as_str(),
                    merged.documentation,
                    id.get(),
                ],
            )
            .map_err(|err| db_err(&err))?;
        // Re-read so the caller observes the trigger-refreshed updated_at.
        Ok(fetch_record(&guard, id)?)
    }

    fn delete(&self, id: ProcessId) -> Result<bool, StoreError> {
        let guard = self.lock()?;
        let affected = guard
            .execute("DELETE FROM processes WHERE id = ?1", params![id.get()])
            .map_err(|err| db_err(&err))?;
        Ok(affected > 0)
    }
}

// ============================================================================
// SECTION: Connection Setup
// ============================================================================

/// Rejects paths that cannot name a database file.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    if path.as_os_str().is_empty() {
        return Err(SqliteStoreError::Invalid("store path is empty".to_string()));
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(format!(
            "store path is a directory: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Creates the parent directory of the database file when missing.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))?;
    }
    Ok(())
}

/// Opens an `SQLite` connection with the configured pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection =
        Connection::open_with_flags(&config.path, flags).map_err(|err| db_err(&err))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(|err| db_err(&err))?;
    connection
        .execute_batch(&format!(
            "PRAGMA journal_mode = {};",
            config.journal_mode.pragma_value()
        ))
        .map_err(|err| db_err(&err))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| db_err(&err))?;
    connection
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| db_err(&err))?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(|err| db_err(&err))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| db_err(&err))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| db_err(&err))?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| db_err(&err))?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS processes (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    email_id TEXT NOT NULL,
                    department TEXT NOT NULL
                        CHECK (department IN ('AP', 'AR', 'GL', 'Payroll')),
                    process_name TEXT NOT NULL CHECK (length(process_name) <= 25),
                    description TEXT CHECK (description IS NULL OR length(description) <= 70),
                    apps_used TEXT NOT NULL,
                    frequency TEXT NOT NULL
                        CHECK (frequency IN ('DAILY', 'WEEKLY', 'BI_WEEKLY', 'MONTHLY',
                                             'QUARTERLY', 'YEARLY')),
                    duration TEXT NOT NULL
                        CHECK (duration GLOB '[0-9][0-9]:[0-9][0-9]'),
                    volume INTEGER NOT NULL CHECK (volume > 0),
                    yearly_volume INTEGER NOT NULL,
                    yearly_duration TEXT NOT NULL,
                    process_status TEXT NOT NULL
                        CHECK (process_status IN ('UNSTRUCTURED', 'STANDARDIZED', 'OPTIMIZED')),
                    documentation TEXT,
                    created_at INTEGER NOT NULL DEFAULT (unixepoch()),
                    updated_at INTEGER NOT NULL DEFAULT (unixepoch())
                );
                CREATE INDEX IF NOT EXISTS idx_processes_department
                    ON processes (department);
                CREATE INDEX IF NOT EXISTS idx_processes_status
                    ON processes (process_status);
                CREATE TRIGGER IF NOT EXISTS trg_processes_touch_updated_at
                AFTER UPDATE ON processes
                FOR EACH ROW
                BEGIN
                    UPDATE processes SET updated_at = unixepoch() WHERE id = NEW.id;
                END;",
            )
            .map_err(|err| db_err(&err))?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(|err| db_err(&err))?;
    Ok(())
}
