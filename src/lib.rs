//! Unitscript reads a systemd service unit and writes a standalone POSIX shell
//! script that approximates running it: per-unit directories are provisioned,
//! environment assignments exported, privileges dropped to the service user,
//! and the ExecStartPre/ExecStart commands run in order with every failure
//! aborting the script.

/// CLI interface.
pub mod cli;

/// Exec-line prefix handling and command wrapping.
pub mod command;

/// Shared constants.
pub mod constants;

/// Error handling.
pub mod error;

/// Unit file parser.
pub mod parser;

/// Privilege-drop rendering.
pub mod privilege;

/// Script synthesis.
pub mod script;

/// Shell quoting.
pub mod shell;

/// Unit model.
pub mod unit;
