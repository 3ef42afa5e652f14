//! Privilege-drop rendering for services that declare `User=`.
//!
//! The generated script runs as whoever invokes it (usually root). When the
//! unit names a service account, the script hands the provisioned
//! directories to that account, gives it a usable login shell, and runs every
//! Exec command through `su`.
use crate::{
    constants::{LOGIN_SHELL, SU_BINARY, SU_HEREDOC_MARKER},
    error::TranslateError,
    shell::quote,
    unit::Unit,
};

/// Target account that commands and directories are handed over to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    username: String,
}

impl UserContext {
    /// Creates a context for `username`.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Reads `[Service] User=` from the unit. Returns `None` when the service
    /// runs as the invoking user.
    pub fn from_unit(unit: &Unit) -> Option<Self> {
        unit.user().map(Self::new)
    }

    /// Name of the target account.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Shell line handing `path` to the target account.
    pub fn chown(&self, path: &str) -> Result<String, TranslateError> {
        Ok(format!("chown {} {}", quote(&self.username)?, quote(path)?))
    }

    /// Shell lines that give the account a POSIX login shell so `su` can run
    /// commands as it.
    pub fn login_shell_setup(&self) -> Result<String, TranslateError> {
        let notice = format!(
            "setting login shell for {} to {LOGIN_SHELL} so commands can be run as them",
            self.username
        );
        Ok(format!(
            "echo {}\nchsh {} -s {LOGIN_SHELL}\n",
            quote(&notice)?,
            quote(&self.username)?,
        ))
    }

    /// Feeds `command` to a shell running as the target account. The quoted
    /// heredoc marker keeps the invoking shell from expanding the command.
    pub fn run_as(&self, command: &str) -> Result<String, TranslateError> {
        Ok(format!(
            "{SU_BINARY} {} <<'{SU_HEREDOC_MARKER}'\n{command}\n{SU_HEREDOC_MARKER}",
            quote(&self.username)?
        ))
    }
}
