//! Shell quoting for text interpolated into the generated script.
use crate::error::TranslateError;

/// Quotes `text` as a single shell word. Text that needs no quoting is
/// returned as-is.
pub fn quote(text: &str) -> Result<String, TranslateError> {
    shlex::try_quote(text)
        .map(|quoted| quoted.into_owned())
        .map_err(|_| TranslateError::UnquotableText(text.to_string()))
}
