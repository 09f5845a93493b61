//! Decoding errors for Kraken response payloads

use thiserror::Error;

/// Error raised while turning a Kraken JSON payload into a typed record
///
/// Every variant carries enough context (record, field, offending value)
/// to debug a failure without looking at the raw response bytes.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Positional array had the wrong number of elements
    #[error("{record}: expected {expected} elements, got {actual}")]
    Length {
        /// Record being decoded (e.g. "book level", "candle")
        record: &'static str,
        /// Accepted length, rendered for humans ("3", "6 or 7")
        expected: String,
        /// Length actually observed
        actual: usize,
    },

    /// A numeric string could not be parsed
    #[error("{field}: invalid number {value:?}")]
    InvalidNumber {
        /// Field that failed
        field: String,
        /// Offending raw value
        value: String,
    },

    /// JSON element had the wrong type
    #[error("{field}: expected {expected}, found {found}")]
    UnexpectedType {
        /// Field that failed
        field: String,
        /// Type the decoder wanted
        expected: &'static str,
        /// JSON type actually present
        found: &'static str,
    },

    /// String did not match any member of a closed set
    #[error("{field}: unknown value {value:?}")]
    UnknownVariant {
        /// Field that failed
        field: String,
        /// Offending raw value
        value: String,
    },

    /// Requested pair is not present in a per-pair result
    #[error("pair not found in response: {0}")]
    UnknownPair(String),

    /// A field inside a derived record failed; `path` is its JSON path
    #[error("{path}: {message}")]
    Field {
        /// Dotted path from the result root (e.g. "open.OABC.vol")
        path: String,
        /// What went wrong at that path
        message: String,
    },

    /// Envelope reported success but carried no result
    #[error("response has no result")]
    MissingResult,

    /// Shape mismatch reported by serde
    #[error("invalid response shape: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    /// Build a length error
    pub fn length(record: &'static str, expected: impl ToString, actual: usize) -> Self {
        Self::Length {
            record,
            expected: expected.to_string(),
            actual,
        }
    }

    /// Build an invalid-number error
    pub fn invalid_number(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Build an unexpected-type error from the JSON value that was found
    pub fn unexpected_type(
        field: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::UnexpectedType {
            field: field.into(),
            expected,
            found: json_type_name(found),
        }
    }

    /// Name of the field this error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::InvalidNumber { field, .. }
            | Self::UnexpectedType { field, .. }
            | Self::UnknownVariant { field, .. } => Some(field),
            Self::Field { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Human name for a JSON value's type
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// Result type alias for decoding
pub type DecodeResult<T> = Result<T, DecodeError>;
