// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for parameter construction and wire parsing

use thiserror::Error;

/// Errors raised while building or parsing WPS parameters
///
/// All variants are raised at the boundary of the operation that detects
/// them. Construction either fully succeeds or returns one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// A mandatory identity-bearing field is absent
    #[error("{kind} must have a {field}")]
    MissingIdentity {
        kind: &'static str,
        field: &'static str,
    },

    /// A composite identity does not split into exactly two parts
    #[error("Malformed identity '{value}': expected '<var_name>|<name>'")]
    MalformedIdentity { value: String },

    /// A closed-set field was given a value outside its set
    #[error("Invalid {field} '{value}': expected one of {allowed}")]
    InvalidEnum {
        field: &'static str,
        value: String,
        allowed: &'static str,
    },

    /// A numeric field has no finite value
    #[error("Invalid {field} '{value}': expected a finite number")]
    InvalidNumber { field: &'static str, value: String },

    /// A wire tree lacks a field or shape the codec requires
    #[error("Schema error in {kind}: {reason}")]
    Schema { kind: &'static str, reason: String },

    /// JSON text could not be produced or parsed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ParameterError {
    pub(crate) fn schema(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::Schema {
            kind,
            reason: reason.into(),
        }
    }
}

/// Result type for parameter operations
pub type ParameterResult<T> = Result<T, ParameterError>;

impl From<serde_json::Error> for ParameterError {
    fn from(err: serde_json::Error) -> Self {
        ParameterError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ParameterError {
    fn from(err: serde_yaml::Error) -> Self {
        ParameterError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParameterError::MissingIdentity {
            kind: "Output",
            field: "uri",
        };
        assert_eq!(err.to_string(), "Output must have a uri");

        let err = ParameterError::MalformedIdentity {
            value: "tas".to_string(),
        };
        assert!(err.to_string().contains("'tas'"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ParameterError = json_err.into();
        assert!(matches!(err, ParameterError::Serialization(_)));
    }
}
