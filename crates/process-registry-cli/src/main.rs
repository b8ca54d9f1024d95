// crates/process-registry-cli/src/main.rs
// ============================================================================
// Module: Process Registry CLI Entry Point
// Description: Command dispatcher for running the registry HTTP server.
// Purpose: Load configuration, open the store, and serve the API.
// Dependencies: clap, process-registry-api, process-registry-store-sqlite, tokio
// ============================================================================

//! ## Overview
//! The CLI exposes one command: `serve`. It loads the TOML configuration
//! (defaults when the file is absent), applies `--listen` and `--db-path`
//! overrides, opens the `SQLite` store, and runs the axum server until
//! shutdown. Logging goes through `tracing` with an env-driven filter
//! (`RUST_LOG`, default `info`).

// ============================================================================
// SECTION: Modules
// ============================================================================

#[cfg(test)]
mod main_tests;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use process_registry_api::ConfigError;
use process_registry_api::RegistryConfig;
use process_registry_api::ServeError;
use process_registry_core::ProcessStore;
use process_registry_store_sqlite::SqliteProcessStore;
use process_registry_store_sqlite::SqliteStoreError;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "process-registry", version, about = "Business process registry server")]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the registry HTTP server.
    Serve(ServeCommand),
}

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Listen address override (e.g. `0.0.0.0:8000`).
    #[arg(long, value_name = "ADDR")]
    listen: Option<String>,
    /// `SQLite` database path override.
    #[arg(long = "db-path", value_name = "PATH")]
    db_path: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failures surfaced to the operator.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration loading or validation failed.
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// Store could not be opened.
    #[error("{0}")]
    Store(#[from] SqliteStoreError),
    /// Server failed to bind or run.
    #[error("{0}")]
    Serve(#[from] ServeError),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(command) => command_serve(command).await,
    }
}

/// Writes an error line to stderr and returns a failure code.
fn emit_error(message: &str) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "error: {message}");
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Runs the registry HTTP server until shutdown.
async fn command_serve(command: ServeCommand) -> Result<ExitCode, CliError> {
    init_tracing();
    let mut config = RegistryConfig::load(command.config.as_deref())?;
    apply_overrides(&mut config, command.listen, command.db_path);
    config.validate()?;

    let store = SqliteProcessStore::new(&config.store.to_sqlite_config())?;
    store.check_connection()?;
    tracing::info!(path = %config.store.path.display(), "sqlite store ready");

    let shared: Arc<dyn ProcessStore> = Arc::new(store);
    process_registry_api::serve(&config.server, shared).await?;
    Ok(ExitCode::SUCCESS)
}

/// Applies command-line overrides on top of the loaded configuration.
fn apply_overrides(
    config: &mut RegistryConfig,
    listen: Option<String>,
    db_path: Option<PathBuf>,
) {
    if let Some(listen) = listen {
        config.server.listen = listen;
    }
    if let Some(path) = db_path {
        config.store.path = path;
    }
}

/// Installs the global tracing subscriber.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
