//! Request decoding for the dispatch loop.
//!
//! A request document is either a single action object or an array of them:
//!
//! ```json
//! {"action":"battery"}
//! [{"action":"get"},{"action":"play","name":"horn"}]
//! ```
//!
//! Both shapes normalise to a [`BatchRequest`]. The whole document is
//! validated before any action runs, so a malformed entry anywhere rejects
//! the request as a unit.

use serde_json::{Map, Value};

use super::errors::DispatchError;

/// Maximum size of a single request document in bytes.
pub(crate) const MAX_REQUEST_BYTES: usize = 64 * 1024;

/// Field naming the action inside a request object.
const ACTION_FIELD: &str = "action";

/// One action requested by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    name: String,
    parameters: Map<String, Value>,
}

impl ActionRequest {
    /// Builds an action request from a decoded JSON object.
    ///
    /// Every field other than `action` becomes a parameter.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InvalidStructure` when `action` is missing, not
    /// a string, or blank.
    pub fn from_object(mut object: Map<String, Value>) -> Result<Self, DispatchError> {
        let name = match object.remove(ACTION_FIELD) {
            Some(Value::String(name)) => name,
            Some(_) => {
                return Err(DispatchError::invalid_structure(
                    "action field must be a string",
                ));
            }
            None => return Err(DispatchError::invalid_structure("missing action field")),
        };
        if name.trim().is_empty() {
            return Err(DispatchError::invalid_structure("action field is empty"));
        }

        Ok(Self {
            name,
            parameters: object,
        })
    }

    /// Name of the requested action, exactly as sent.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters accompanying the action.
    #[must_use]
    pub const fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }
}

/// Ordered, non-empty sequence of action requests.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    actions: Vec<ActionRequest>,
}

impl BatchRequest {
    /// Parses a request document.
    ///
    /// Trailing whitespace (including a line delimiter) is ignored and does
    /// not count towards the size limit.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::MalformedJson` for empty or undecodable input,
    /// `DispatchError::RequestTooLarge` for oversized input, and
    /// `DispatchError::InvalidStructure` when the document is not an action
    /// object or a non-empty array of action objects.
    pub fn parse(raw: &[u8]) -> Result<Self, DispatchError> {
        let document = raw.trim_ascii_end();
        if document.len() > MAX_REQUEST_BYTES {
            return Err(DispatchError::request_too_large(
                document.len(),
                MAX_REQUEST_BYTES,
            ));
        }
        if document.is_empty() {
            return Err(DispatchError::malformed("empty request"));
        }

        let value: Value =
            serde_json::from_slice(document).map_err(DispatchError::from_json_error)?;
        Self::from_document(value)
    }

    /// Normalises a decoded request document.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InvalidStructure` for any root other than an
    /// action object or a non-empty array of action objects.
    pub fn from_document(document: Value) -> Result<Self, DispatchError> {
        let actions = match document {
            Value::Object(object) => vec![ActionRequest::from_object(object)?],
            Value::Array(entries) if entries.is_empty() => {
                return Err(DispatchError::invalid_structure("request array is empty"));
            }
            Value::Array(entries) => entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| match entry {
                    Value::Object(object) => ActionRequest::from_object(object),
                    _ => Err(DispatchError::invalid_structure(format!(
                        "request entry {index} is not an object"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            other => {
                return Err(DispatchError::invalid_structure(format!(
                    "request must be an object or an array, got {}",
                    json_kind(&other)
                )));
            }
        };

        Ok(Self { actions })
    }

    /// Number of actions in the batch.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the batch has no actions. Parsed batches never do.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Actions in submission order.
    pub fn iter(&self) -> impl Iterator<Item = &ActionRequest> {
        self.actions.iter()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
