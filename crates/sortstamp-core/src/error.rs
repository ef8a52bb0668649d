use serde::{Deserialize, Serialize};

/// A timestamp string did not match the expected format.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("timestamp '{value}' cannot be parsed as {format}")]
pub struct ParseError {
    /// The string that failed to parse, verbatim.
    pub value: String,
    /// The name of the format that was attempted.
    pub format: String,
}

impl ParseError {
    pub(crate) fn new(value: &str, format: &str) -> Self {
        Self {
            value: value.to_string(),
            format: format.to_string(),
        }
    }
}

/// Errors that can arise from decoding a sortable timestamp from structured
/// text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Error {
    /// The payload was not a valid quoted string literal.
    #[error("value is not a valid string literal: {0}")]
    Unquote(String),
    /// The unquoted string was not a valid timestamp.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
