// crates/process-registry-api/src/config.rs
// ============================================================================
// Module: Registry Configuration
// Description: TOML configuration for the API server and its store.
// Purpose: Load, default, and validate deployment settings.
// Dependencies: serde, toml, process-registry-store-sqlite
// ============================================================================

//! ## Overview
//! Deployment configuration lives in a single TOML file with a `[server]`
//! section for the HTTP listener and a `[store]` section for the `SQLite`
//! database. Every field has a default, and a missing config file yields the
//! full default configuration, so a bare `process-registry serve` works
//! against a local database with no setup.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use process_registry_store_sqlite::SqliteJournalMode;
use process_registry_store_sqlite::SqliteStoreConfig;
use process_registry_store_sqlite::SqliteSyncMode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum allowed config file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default listen address for the HTTP server.
const DEFAULT_LISTEN: &str = "127.0.0.1:8000";
/// Default multipart upload cap in bytes (1 MiB).
const DEFAULT_MAX_UPLOAD_BYTES: usize = 1024 * 1024;
/// Default `SQLite` database file path.
const DEFAULT_DB_PATH: &str = "processes.db";
/// Default `SQLite` busy timeout in milliseconds.
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error, Clone)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Config file could not be parsed.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Config contents are invalid.
    #[error("config invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Process registry configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Persistence configuration.
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the server listens on.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Maximum accepted multipart upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// `SQLite` store configuration section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the `SQLite` database file.
    #[serde(default = "default_db_path")]
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

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteJournalMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

impl StoreConfig {
    /// Converts this section into a store-crate config.
    #[must_use]
    pub fn to_sqlite_config(&self) -> SqliteStoreConfig {
        SqliteStoreConfig {
            path: self.path.clone(),
            busy_timeout_ms: self.busy_timeout_ms,
            journal_mode: self.journal_mode,
            sync_mode: self.sync_mode,
        }
    }
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl RegistryConfig {
    /// Loads configuration from the given path.
    ///
    /// A `None` path or a path that does not exist yields the default
    /// configuration; a present file that fails to read or parse is an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(resolved) = path else {
            return Ok(Self::default());
        };
        if !resolved.exists() {
            return Ok(Self::default());
        }
        let bytes = fs::read(resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "invalid listen address: {}",
                self.server.listen
            )));
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_upload_bytes must be greater than zero".to_string(),
            ));
        }
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store path must not be empty".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the default listen address.
fn default_listen() -> String {
    DEFAULT_LISTEN.to_string()
}

/// Returns the default multipart upload cap.
const fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

/// Returns the default database path.
fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}

/// Returns the default busy timeout.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}
