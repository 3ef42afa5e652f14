//! Exec-line prefix handling and command wrapping.
use crate::{
    constants::{EXEC_PREFIX_CHARS, IGNORE_FAILURE_GUARD},
    error::TranslateError,
    privilege::UserContext,
};

/// Leading characters that modify how an Exec command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecPrefix {
    /// `@`: the second word becomes argv[0]. Unsupported.
    ArgvZero,
    /// `-`: a non-zero exit status is ignored.
    IgnoreFailure,
    /// `:`: no environment variable substitution. Stripped only.
    NoSubstitution,
    /// `+`: full privileges. Stripped only.
    FullPrivileges,
    /// `!`: elevated privileges without user switching. Stripped only.
    AmbientPrivileges,
}

impl ExecPrefix {
    /// Maps a prefix character to its meaning.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '@' => Some(Self::ArgvZero),
            '-' => Some(Self::IgnoreFailure),
            ':' => Some(Self::NoSubstitution),
            '+' => Some(Self::FullPrivileges),
            '!' => Some(Self::AmbientPrivileges),
            _ => None,
        }
    }
}

/// An Exec value split into its prefixes and the command proper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecCommand<'a> {
    raw: &'a str,
    prefixes: Vec<ExecPrefix>,
    body: &'a str,
}

impl<'a> ExecCommand<'a> {
    /// Splits the leading run of prefix characters off `raw`.
    pub fn parse(raw: &'a str) -> Self {
        let body = raw.trim_start_matches(EXEC_PREFIX_CHARS);
        let prefixes = raw[..raw.len() - body.len()]
            .chars()
            .filter_map(ExecPrefix::from_char)
            .collect();
        Self {
            raw,
            prefixes,
            body,
        }
    }

    /// The value as written in the unit file.
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// The command with every prefix removed.
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Whether `prefix` appears in the leading run.
    pub fn has(&self, prefix: ExecPrefix) -> bool {
        self.prefixes.contains(&prefix)
    }

    /// Renders the shell fragment running this command. Fails for `@`, which
    /// cannot be approximated, and for commands with nothing left to run.
    pub fn render(
        &self,
        directive: &str,
        user: Option<&UserContext>,
    ) -> Result<String, TranslateError> {
        if self.has(ExecPrefix::ArgvZero) {
            return Err(TranslateError::UnsupportedExecPrefix {
                command: self.raw.to_string(),
            });
        }

        if self.body.trim().is_empty() {
            return Err(TranslateError::EmptyCommand {
                directive: directive.to_string(),
                command: self.raw.to_string(),
            });
        }

        let mut command = self.body.to_string();
        if self.has(ExecPrefix::IgnoreFailure) {
            command.push_str(IGNORE_FAILURE_GUARD);
        }

        Ok(match user {
            Some(user) => user.run_as(&command)?,
            None => command,
        })
    }
}

/// Wraps a raw Exec value for the generated script.
pub fn wrap_command(
    raw: &str,
    directive: &str,
    user: Option<&UserContext>,
) -> Result<String, TranslateError> {
    ExecCommand::parse(raw).render(directive, user)
}
