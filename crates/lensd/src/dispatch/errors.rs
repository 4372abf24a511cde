//! Error types for request dispatch failures.
//!
//! Failures fall into two tiers. [`DispatchError`] rejects the whole request
//! before any action runs; the client receives the [`INVALID_REQUEST`]
//! sentinel instead of a JSON document. [`ActionError`] is scoped to a single
//! action and ends up as an error entry in the response, leaving the rest of
//! the batch untouched.

use thiserror::Error;

use crate::gateway::GatewayError;
use crate::quality::QualityParseError;

/// Sentinel returned in place of a response document when a request cannot
/// be decoded.
pub const INVALID_REQUEST: &str = "INVALID REQUEST";

/// Errors that abort an entire request.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Request text is not valid JSON.
    #[error("malformed request: {message}")]
    MalformedJson {
        /// Description of the decoding failure.
        message: String,
        /// Decoder error, when there was one.
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Request JSON is valid but does not describe actions.
    #[error("invalid request structure: {message}")]
    InvalidStructure {
        /// What was wrong with the document.
        message: String,
    },

    /// Request exceeds the maximum allowed size.
    #[error("request too large: {size} bytes exceeds {max_size} byte limit")]
    RequestTooLarge {
        /// Size of the trimmed document in bytes.
        size: usize,
        /// Accepted maximum in bytes.
        max_size: usize,
    },

    /// Response serialization failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[from] serde_json::Error),
}

impl DispatchError {
    /// Whether the error is the client's fault rather than the daemon's.
    #[must_use]
    pub const fn is_invalid_request(&self) -> bool {
        !matches!(self, Self::SerializeResponse(_))
    }

    /// Creates a malformed JSON error from a serde error.
    #[must_use]
    pub fn from_json_error(source: serde_json::Error) -> Self {
        Self::MalformedJson {
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a malformed JSON error with a custom message.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedJson {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an invalid structure error.
    #[must_use]
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    /// Creates a request too large error.
    #[must_use]
    pub const fn request_too_large(size: usize, max_size: usize) -> Self {
        Self::RequestTooLarge { size, max_size }
    }
}

/// Errors confined to a single action of a batch.
#[derive(Debug, Error)]
pub enum ActionError {
    /// No action with this name is registered.
    #[error("unknown action '{name}'")]
    UnknownAction {
        /// Name as sent by the client.
        name: String,
    },

    /// A required parameter was absent.
    #[error("{action}: missing parameter '{parameter}'")]
    MissingParameter {
        /// Action that needed the parameter.
        action: &'static str,
        /// Dotted path of the parameter.
        parameter: String,
    },

    /// A parameter was present but unusable.
    #[error("{action}: invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        /// Action that read the parameter.
        action: &'static str,
        /// Dotted path of the parameter.
        parameter: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The video quality string could not be parsed.
    #[error(transparent)]
    Quality(#[from] QualityParseError),

    /// The device gateway failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The action produced a result that could not be encoded.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the failure.
        message: String,
    },
}

impl ActionError {
    /// Creates an unknown action error.
    #[must_use]
    pub fn unknown_action(name: impl Into<String>) -> Self {
        Self::UnknownAction { name: name.into() }
    }

    /// Creates a missing parameter error.
    #[must_use]
    pub fn missing_parameter(action: &'static str, parameter: impl Into<String>) -> Self {
        Self::MissingParameter {
            action,
            parameter: parameter.into(),
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(
        action: &'static str,
        parameter: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            action,
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
