//! Constants used while parsing units and synthesizing scripts.
//!
//! Paths, marker strings and directive names live here so the parser and the
//! synthesizer agree on them.

// ============================================================================
// Unit File Vocabulary
// ============================================================================

/// Section holding the directives the synthesizer acts upon.
pub const SERVICE_SECTION: &str = "Service";

/// Pre-start commands, named in empty-command errors.
pub const EXEC_START_PRE_KEY: &str = "ExecStartPre";

/// Main command of the service.
pub const EXEC_START_KEY: &str = "ExecStart";

/// Directory the service changes into before running commands.
pub const WORKING_DIRECTORY_KEY: &str = "WorkingDirectory";

/// Account the service's commands run as.
pub const USER_KEY: &str = "User";

/// Suffix removed from unit file names to form the unit name.
pub const UNIT_SUFFIX: &str = ".service";

/// Characters accepted as Exec-line prefixes.
pub const EXEC_PREFIX_CHARS: &[char] = &['@', '-', ':', '+', '!'];

// ============================================================================
// Generated Script
// ============================================================================

/// Interpreter written into the shebang when none is configured.
pub const DEFAULT_INTERPRETER: &str = "/bin/sh";

/// Login shell assigned to the service user so `su` can run commands.
pub const LOGIN_SHELL: &str = "/bin/sh";

/// Binary used to drop privileges to the service user.
pub const SU_BINARY: &str = "/bin/su";

/// Heredoc terminator for commands fed to `su`.
pub const SU_HEREDOC_MARKER: &str = "EOSUWRAPPEDCMD";

/// Variable that carries the failing exit status in a Failure-Check.
pub const FAILURE_STATUS_VAR: &str = "FATAL_ERR";

/// Guard appended to commands whose exit status is ignored.
pub const IGNORE_FAILURE_GUARD: &str = "; (exit 0);";

/// Banner echoed before the ExecStartPre commands.
pub const EXEC_START_PRE_BANNER: &str = "Running ExecStartPre commands";
