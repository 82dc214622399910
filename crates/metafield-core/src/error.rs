//! Error types for metadata field reads.

use std::convert::Infallible;

use thiserror::Error;

/// Errors that can occur when reading a metadata field.
///
/// Writes never fail: every `set` path is total for a well-typed value.
/// Absence is not an error either; only fields that promise a value
/// (required fields without a fallback) surface these.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// A stored string could not be parsed into the field's value type.
    #[error("malformed value for key {key}: {raw:?}")]
    MalformedValue { key: String, raw: String },

    /// A required field had no value where one is mandatory.
    #[error("missing required field: {key}")]
    MissingRequiredField { key: String },
}

impl FieldError {
    /// The key (or label) of the field that failed.
    pub fn key(&self) -> &str {
        match self {
            FieldError::MalformedValue { key, .. } => key,
            FieldError::MissingRequiredField { key } => key,
        }
    }
}

impl From<Infallible> for FieldError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Convenience type alias for field reads.
pub type FieldResult<T> = std::result::Result<T, FieldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_key() {
        let err = FieldError::MalformedValue {
            key: "count".into(),
            raw: "notanumber".into(),
        };
        assert_eq!(err.to_string(), "malformed value for key count: \"notanumber\"");
        assert_eq!(err.key(), "count");

        let err = FieldError::MissingRequiredField { key: "title".into() };
        assert_eq!(err.to_string(), "missing required field: title");
        assert_eq!(err.key(), "title");
    }
}
