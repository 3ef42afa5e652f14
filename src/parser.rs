//! Line-oriented directive parser for unit files.
use std::{fmt, fs, path::Path};

use tracing::warn;

use crate::{
    error::{ParseError, TranslateError},
    unit::Unit,
};

/// A line that was skipped while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
    /// 1-based line number.
    pub line: usize,
    /// The trimmed line text.
    pub text: String,
    /// Why the line was skipped.
    pub error: ParseError,
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} \"{}\" skipped: {}", self.line, self.text, self.error)
    }
}

/// Outcome of a parse pass: the model and every line that was skipped.
#[derive(Debug, Default)]
pub struct ParsedUnit {
    /// The populated unit model.
    pub unit: Unit,
    /// Diagnostics for skipped lines, in file order.
    pub diagnostics: Vec<ParseDiagnostic>,
}

enum Line<'a> {
    Blank,
    Section(&'a str),
    Directive { key: &'a str, value: &'a str },
}

fn classify(line: &str) -> Result<Line<'_>, ParseError> {
    if line.is_empty() {
        return Ok(Line::Blank);
    }

    if let Some(name) = line
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return Ok(Line::Section(name));
    }

    let (key, value) = line.split_once('=').ok_or(ParseError::MissingSeparator)?;
    Ok(Line::Directive { key, value })
}

/// Parses unit file content. Malformed lines never abort the pass; each one
/// is recorded as a diagnostic and contributes nothing to the model.
pub fn parse_unit(content: &str) -> ParsedUnit {
    let mut parsed = ParsedUnit::default();
    let mut section = String::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        match classify(line) {
            Ok(Line::Blank) => {}
            Ok(Line::Section(name)) => section = name.to_string(),
            Ok(Line::Directive { key, value }) => {
                parsed.unit.handle_directive(&section, key, value);
            }
            Err(error) => {
                let diagnostic = ParseDiagnostic {
                    line: idx + 1,
                    text: line.to_string(),
                    error,
                };
                warn!("{diagnostic}");
                parsed.diagnostics.push(diagnostic);
            }
        }
    }

    parsed
}

/// Reads and parses the unit file at `path`.
pub fn load_unit(path: &Path) -> Result<ParsedUnit, TranslateError> {
    let content =
        fs::read_to_string(path).map_err(|source| TranslateError::UnitReadError {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_unit(&content))
}
