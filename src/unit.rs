//! In-memory model of a parsed unit file.
use std::collections::BTreeMap;

use serde::Serialize;
use strum_macros::EnumString;
use tracing::debug;

use crate::{
    constants::{SERVICE_SECTION, USER_KEY},
    error::TranslateError,
};

/// Directives under `[Service]` whose occurrences accumulate instead of
/// overwriting each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum RepeatableDirective {
    /// `Environment=` assignments, exported in declaration order.
    Environment,
    /// `ExecStartPre=` commands, run in declaration order.
    ExecStartPre,
}

impl RepeatableDirective {
    /// Classifies a directive. Only keys under `[Service]` can be repeatable.
    pub fn classify(section: &str, key: &str) -> Option<Self> {
        if section != SERVICE_SECTION {
            return None;
        }
        key.parse().ok()
    }
}

/// Parsed unit: a generic two-level section/key map plus the two repeatable
/// `[Service]` directives kept as ordered sequences.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Section name to last-seen value for each singular key.
    pub sections: BTreeMap<String, BTreeMap<String, String>>,
    /// `Environment=` values with one layer of surrounding quotes removed.
    pub env: Vec<String>,
    /// Raw `ExecStartPre=` values.
    pub exec_start_pre: Vec<String>,
}

impl Unit {
    /// Creates an empty unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes one directive into the model using its section context.
    pub fn handle_directive(&mut self, section: &str, key: &str, value: &str) {
        debug!("key {key} and section {section}");
        match RepeatableDirective::classify(section, key) {
            Some(RepeatableDirective::Environment) => {
                self.env.push(strip_quotes(value).to_string());
            }
            Some(RepeatableDirective::ExecStartPre) => {
                self.exec_start_pre.push(value.to_string());
            }
            None => {
                self.sections
                    .entry(section.to_string())
                    .or_default()
                    .insert(key.to_string(), value.to_string());
            }
        }
    }

    /// Looks up a singular directive.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    /// Looks up a singular directive that must be present.
    pub fn require(&self, section: &str, key: &str) -> Result<&str, TranslateError> {
        self.get(section, key)
            .ok_or_else(|| TranslateError::MissingDirective {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// Account named by `[Service] User=`, if any.
    pub fn user(&self) -> Option<&str> {
        self.get(SERVICE_SECTION, USER_KEY)
    }
}

/// Removes one layer of surrounding double quotes.
fn strip_quotes(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
