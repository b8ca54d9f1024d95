// crates/process-registry-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Unit Tests
// Description: Unit tests for argument parsing and config overrides.
// Purpose: Validate CLI surface without starting a server.
// Dependencies: process-registry-cli
// ============================================================================

//! ## Overview
//! Exercises clap parsing for the `serve` command and the override merge
//! onto a loaded configuration.

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

use std::path::PathBuf;

use clap::Parser;
use process_registry_api::RegistryConfig;

use super::Cli;
use super::Commands;
use super::apply_overrides;

/// The serve command parses its flags into the expected fields.
#[test]
fn serve_flags_parse() {
    let cli = Cli::try_parse_from([
        "process-registry",
        "serve",
        "--config",
        "registry.toml",
        "--listen",
        "0.0.0.0:9000",
        "--db-path",
        "data/registry.db",
    ])
    .expect("parse");
    let Commands::Serve(command) = cli.command;
    assert_eq!(command.config, Some(PathBuf::from("registry.toml")));
    assert_eq!(command.listen.as_deref(), Some("0.0.0.0:9000"));
    assert_eq!(command.db_path, Some(PathBuf::from("data/registry.db")));
}

/// A bare serve command leaves every option unset.
#[test]
fn serve_defaults_parse() {
    let cli = Cli::try_parse_from(["process-registry", "serve"]).expect("parse");
    let Commands::Serve(command) = cli.command;
    assert_eq!(command.config, None);
    assert_eq!(command.listen, None);
    assert_eq!(command.db_path, None);
}

/// Overrides replace the loaded values; absent overrides leave them alone.
#[test]
fn overrides_merge_onto_config() {
    let mut config = RegistryConfig::default();
    apply_overrides(&mut config, Some("0.0.0.0:9000".to_string()), None);
    assert_eq!(config.server.listen, "0.0.0.0:9000");
    assert_eq!(config.store.path, PathBuf::from("processes.db"));

    apply_overrides(&mut config, None, Some(PathBuf::from("other.db")));
    assert_eq!(config.server.listen, "0.0.0.0:9000");
    assert_eq!(config.store.path, PathBuf::from("other.db"));
}

/// An unknown subcommand is rejected.
#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["process-registry", "unknown"]).is_err());
}
