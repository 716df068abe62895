//! Error types for the Todoist client.
//!
//! # Design
//! Callers see three kinds of failure, reported by `TodoistError::kind`:
//! construction problems, missing operation inputs, and everything that went
//! wrong while calling the API. The last kind keeps its cause chain in
//! `ApiCause` so a vendor-reported rejection can be told apart from a broken
//! connection or an unreadable body without matching on message text.

use thiserror::Error;

use crate::http::TransportError;

/// Message used for any failure that is not a vendor-reported rejection.
pub const CALL_FAILED: &str = "Error calling API";

/// Coarse classification of a `TodoistError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Validation,
    Api,
}

#[derive(Debug, Error)]
pub enum TodoistError {
    /// The client could not be constructed from the given configuration.
    #[error("{0}")]
    Configuration(String),

    /// A required operation input was missing or empty. Nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The call was sent (or attempted) and did not succeed.
    #[error("{message}")]
    Api {
        message: String,
        #[source]
        cause: ApiCause,
    },
}

/// Underlying reason for a `TodoistError::Api`.
#[derive(Debug, Error)]
pub enum ApiCause {
    /// The API rejected the call, by status or by an embedded error field.
    #[error("API responded with status {status}: {payload}")]
    Response {
        status: u16,
        payload: serde_json::Value,
    },

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A body could not be serialized, parsed, or reshaped.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl TodoistError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoistError::Configuration(_) => ErrorKind::Configuration,
            TodoistError::Validation(_) => ErrorKind::Validation,
            TodoistError::Api { .. } => ErrorKind::Api,
        }
    }

    pub(crate) fn missing(field: &str, operation: &str) -> Self {
        TodoistError::Validation(format!("{field} is required to {operation}"))
    }

    /// Wrap a failure that happened while making the call.
    pub(crate) fn call(cause: impl Into<ApiCause>) -> Self {
        TodoistError::Api {
            message: CALL_FAILED.to_string(),
            cause: cause.into(),
        }
    }

    pub(crate) fn rejected(message: String, status: u16, payload: serde_json::Value) -> Self {
        TodoistError::Api {
            message,
            cause: ApiCause::Response { status, payload },
        }
    }

    /// The error payload returned by the API, if the API rejected the call.
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self {
            TodoistError::Api {
                cause: ApiCause::Response { payload, .. },
                ..
            } => Some(payload),
            _ => None,
        }
    }

    /// The HTTP status of a rejected call.
    pub fn status(&self) -> Option<u16> {
        match self {
            TodoistError::Api {
                cause: ApiCause::Response { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T, E = TodoistError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use serde_json::json;

    use super::*;

    #[test]
    fn missing_names_field_and_operation() {
        let err = TodoistError::missing("sectionId", "getSectionById");
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "sectionId is required to getSectionById");
    }

    #[test]
    fn rejected_exposes_payload_and_status() {
        let payload = json!({"error": "Task not found", "http_code": 404});
        let err = TodoistError::rejected("Task not found".to_string(), 404, payload.clone());
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.to_string(), "Task not found");
        assert_eq!(err.payload(), Some(&payload));
        assert_eq!(err.status(), Some(404));
        assert!(err.source().is_some());
    }

    #[test]
    fn call_failure_uses_generic_message() {
        let parse = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = TodoistError::call(parse);
        assert_eq!(err.to_string(), CALL_FAILED);
        assert!(err.payload().is_none());
        assert!(matches!(
            err,
            TodoistError::Api {
                cause: ApiCause::Json(_),
                ..
            }
        ));
    }
}
