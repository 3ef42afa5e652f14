//! Shell script synthesis from a parsed unit.
//!
//! Emission is a fixed linear sequence: shebang, directory provisioning,
//! login shell setup, environment exports, working directory, ExecStartPre
//! commands and finally ExecStart. Optional blocks are gated only by whether
//! the unit declares the directive they act upon. Every step that can fail at
//! runtime is followed by a Failure-Check that aborts the generated script
//! with the failing status.
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter};
use tracing::debug;

use crate::{
    command::wrap_command,
    constants::{
        DEFAULT_INTERPRETER, EXEC_START_KEY, EXEC_START_PRE_BANNER, EXEC_START_PRE_KEY,
        FAILURE_STATUS_VAR, SERVICE_SECTION, UNIT_SUFFIX, WORKING_DIRECTORY_KEY,
    },
    error::TranslateError,
    privilege::UserContext,
    shell::quote,
    unit::Unit,
};

/// Per-unit directories provisioned before any command runs, mirroring the
/// systemd `*Directory=` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ManagedDirectory {
    /// `/run/<unit>`
    Runtime,
    /// `/var/lib/<unit>`
    State,
    /// `/var/cache/<unit>`
    Cache,
    /// `/var/logs/<unit>`
    Logs,
    /// `/etc/<unit>`
    Configuration,
}

impl ManagedDirectory {
    /// Parent directory the unit's directory is created under.
    pub fn root(&self) -> &'static str {
        match self {
            Self::Runtime => "/run",
            Self::State => "/var/lib",
            Self::Cache => "/var/cache",
            Self::Logs => "/var/logs",
            Self::Configuration => "/etc",
        }
    }

    /// Variable exporting the directory path (e.g. `RUNTIME_DIRECTORY`).
    pub fn env_var(&self) -> String {
        let name: &str = self.as_ref();
        format!("{name}_DIRECTORY")
    }

    /// Full directory path for `unit_name`.
    pub fn path(&self, unit_name: &str) -> String {
        format!("{}/{unit_name}", self.root())
    }
}

/// Derives the unit name from a unit file path: its base name without a
/// trailing `.service`.
pub fn unit_name_from_path(path: &Path) -> Result<String, TranslateError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match file_name.strip_suffix(UNIT_SUFFIX) {
        Some(stem) => stem.to_string(),
        None => file_name,
    };
    check_unit_name(&name).map_err(|_| TranslateError::InvalidUnitName {
        input: path.display().to_string(),
    })?;
    Ok(name)
}

/// Rejects names that would make a provisioned directory resolve to its
/// parent (`/run/`, `/etc/..`) or to some other location.
fn check_unit_name(name: &str) -> Result<(), TranslateError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(TranslateError::InvalidUnitName {
            input: name.to_string(),
        });
    }
    Ok(())
}

/// Renders the Failure-Check placed after a risky command: on a non-zero
/// status it reports `message` with the status and exits with that status.
pub fn failure_check(message: &str) -> Result<String, TranslateError> {
    let var = FAILURE_STATUS_VAR;
    Ok(format!(
        "\n{var}=$?\n\
         if [ \"${var}\" -ne 0 ]\n\
         then\n\
         \x20 export {var}\n\
         \x20 echo \"Non-zero exit code ${var}.\" {message}\n\
         \x20 exit ${var}\n\
         fi\n",
        message = quote(message)?,
    ))
}

/// Turns a [`Unit`] into a POSIX shell script.
#[derive(Debug)]
pub struct ScriptSynthesizer<'a> {
    unit: &'a Unit,
    unit_name: String,
    interpreter: String,
    user: Option<UserContext>,
    require_exec_start: bool,
}

impl<'a> ScriptSynthesizer<'a> {
    /// Creates a synthesizer for `unit` named `unit_name`, using the default
    /// interpreter.
    pub fn new(unit: &'a Unit, unit_name: impl Into<String>) -> Self {
        Self {
            unit,
            unit_name: unit_name.into(),
            interpreter: DEFAULT_INTERPRETER.to_string(),
            user: UserContext::from_unit(unit),
            require_exec_start: false,
        }
    }

    /// Sets the interpreter named in the shebang.
    pub fn interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Fails synthesis when `[Service]` declares no `ExecStart`.
    pub fn require_exec_start(mut self, required: bool) -> Self {
        self.require_exec_start = required;
        self
    }

    /// Writes the script into `out`. On error, whatever was already emitted
    /// stays in `out`.
    pub fn render<W: Write>(&self, out: &mut W) -> Result<(), TranslateError> {
        check_unit_name(&self.unit_name)?;
        writeln!(out, "#!{}", self.interpreter)?;
        self.write_directories(out)?;
        self.write_login_shell(out)?;
        self.write_exports(out)?;
        self.write_working_directory(out)?;
        self.write_exec_start_pre(out)?;
        self.write_exec_start(out)?;
        Ok(())
    }

    /// Renders the script into a string.
    pub fn render_to_string(&self) -> Result<String, TranslateError> {
        let mut buf = Vec::new();
        self.render(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Creates `path` and writes the script into it. The file is closed on
    /// every exit path; a failed synthesis can leave a partial file behind.
    pub fn write_to_path(&self, path: &Path) -> Result<(), TranslateError> {
        let write_error = |source| TranslateError::ScriptWriteError {
            path: PathBuf::from(path),
            source,
        };

        let file = File::create(path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        self.render(&mut writer).map_err(|err| match err {
            TranslateError::EmitError(source) => write_error(source),
            other => other,
        })?;
        writer.flush().map_err(write_error)?;
        debug!("Wrote script for unit '{}' to {:?}", self.unit_name, path);
        Ok(())
    }

    fn directive(
        &self,
        key: &str,
        required: bool,
    ) -> Result<Option<&'a str>, TranslateError> {
        if required {
            self.unit.require(SERVICE_SECTION, key).map(Some)
        } else {
            Ok(self.unit.get(SERVICE_SECTION, key))
        }
    }

    fn write_directories<W: Write>(&self, out: &mut W) -> Result<(), TranslateError> {
        for dir in ManagedDirectory::iter() {
            let path = dir.path(&self.unit_name);
            let quoted = quote(&path)?;
            let var = dir.env_var();

            write!(out, "\nmkdir -p {quoted}\n")?;
            out.write_all(failure_check(&format!("mkdir {path} for {var}"))?.as_bytes())?;
            writeln!(out, "export {var}={quoted}")?;
            writeln!(out, "echo {var}={quoted}")?;
            if let Some(user) = &self.user {
                writeln!(out, "{}", user.chown(&path)?)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_login_shell<W: Write>(&self, out: &mut W) -> Result<(), TranslateError> {
        if let Some(user) = &self.user {
            write!(out, "\n{}\n", user.login_shell_setup()?)?;
        }
        Ok(())
    }

    fn write_exports<W: Write>(&self, out: &mut W) -> Result<(), TranslateError> {
        for assignment in &self.unit.env {
            writeln!(out, "export {assignment}")?;
        }
        Ok(())
    }

    fn write_working_directory<W: Write>(
        &self,
        out: &mut W,
    ) -> Result<(), TranslateError> {
        let Some(dir) = self.directive(WORKING_DIRECTORY_KEY, false)? else {
            return Ok(());
        };

        writeln!(out, "echo {}", quote(&format!("WorkingDirectory={dir}"))?)?;
        writeln!(out, "cd {dir}")?;
        out.write_all(failure_check("changing to working directory")?.as_bytes())?;
        Ok(())
    }

    fn write_exec_start_pre<W: Write>(&self, out: &mut W) -> Result<(), TranslateError> {
        writeln!(out, "echo {}", quote(EXEC_START_PRE_BANNER)?)?;
        for pre in &self.unit.exec_start_pre {
            let wrapped = wrap_command(pre, EXEC_START_PRE_KEY, self.user.as_ref())?;
            writeln!(out, "{wrapped}")?;
            out.write_all(failure_check(&format!("command: {pre}"))?.as_bytes())?;
        }
        Ok(())
    }

    fn write_exec_start<W: Write>(&self, out: &mut W) -> Result<(), TranslateError> {
        let Some(command) = self.directive(EXEC_START_KEY, self.require_exec_start)?
        else {
            return Ok(());
        };

        writeln!(out, "echo {}", quote(&format!("Running ExecStart {command}"))?)?;
        let wrapped = wrap_command(command, EXEC_START_KEY, self.user.as_ref())?;
        writeln!(out, "{wrapped}")?;
        out.write_all(failure_check("running ExecStart")?.as_bytes())?;
        Ok(())
    }
}
