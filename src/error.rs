//! Error handling for unitscript.
use std::path::PathBuf;

use thiserror::Error;

/// Defines all fatal errors that abort a translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Error reading the unit file.
    #[error("Failed to read unit file '{}': {source}", path.display())]
    UnitReadError {
        /// Path of the unit file.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error creating or flushing the output script.
    #[error("Failed to write script '{}': {source}", path.display())]
    ScriptWriteError {
        /// Path of the output script.
        path: PathBuf,
        /// The underlying error that occurred.
        #[source]
        source: std::io::Error,
    },

    /// Error emitting script text into the output sink.
    #[error("Failed to emit script: {0}")]
    EmitError(#[from] std::io::Error),

    /// An Exec line uses the `@` prefix, which overrides argv[0] and cannot be
    /// approximated in a shell script.
    #[error("'@' executable prefix is not supported (it replaces argv[0]): {command}")]
    UnsupportedExecPrefix {
        /// The raw command, prefixes included.
        command: String,
    },

    /// An Exec line has nothing left to run once its prefixes are removed.
    #[error("Empty command line in {directive}: '{command}'")]
    EmptyCommand {
        /// Directive the command came from (e.g. `ExecStart`).
        directive: String,
        /// The raw command, prefixes included.
        command: String,
    },

    /// A lookup that demands presence found nothing.
    #[error("Missing required key {key} in section {section}")]
    MissingDirective {
        /// Section that was searched.
        section: String,
        /// Key that was absent.
        key: String,
    },

    /// Text interpolated into the script cannot be quoted for the shell.
    #[error("Cannot quote text for the shell (contains a NUL byte): {0:?}")]
    UnquotableText(String),

    /// The unit name is empty or a relative path component, so the
    /// provisioned directories would collapse onto their parents.
    #[error("Cannot derive a unit name from '{input}'")]
    InvalidUnitName {
        /// Unit file path or name that was rejected.
        input: String,
    },
}

/// Reasons a single unit-file line is skipped during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line is neither a section header nor a `key=value` directive.
    #[error("no '=' separator")]
    MissingSeparator,
}
