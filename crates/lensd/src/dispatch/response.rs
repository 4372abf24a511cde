//! Response document assembly.
//!
//! A response is one JSON object with a key per submitted action, in
//! submission order:
//!
//! ```json
//! {"battery":"87","play":[],"bogus":{"error":"unknown action 'bogus'"}}
//! ```
//!
//! Entries are written verbatim. When a batch repeats an action name the
//! object carries duplicate keys; most JSON parsers keep only the last one,
//! which is a limitation of the wire format rather than of the builder.

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::errors::{ActionError, DispatchError};

/// Value produced by a successful action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult {
    /// A single string value.
    Scalar(String),
    /// An ordered list of strings.
    List(Vec<String>),
    /// A JSON object; key order is preserved.
    Object(Value),
    /// Acknowledgement without data, rendered as `[]`.
    Empty,
}

impl ActionResult {
    /// Encodes a serializable report as an object result.
    ///
    /// # Errors
    ///
    /// Returns `ActionError::Internal` if the report does not serialize to a
    /// JSON object.
    pub fn object<T: Serialize>(report: &T) -> Result<Self, ActionError> {
        match serde_json::to_value(report) {
            Ok(value @ Value::Object(_)) => Ok(Self::Object(value)),
            Ok(_) => Err(ActionError::internal("report did not encode as an object")),
            Err(error) => Err(ActionError::internal(error.to_string())),
        }
    }
}

impl Serialize for ActionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(value) => serializer.serialize_str(value),
            Self::List(values) => values.serialize(serializer),
            Self::Object(value) => value.serialize(serializer),
            Self::Empty => serializer.serialize_seq(Some(0))?.end(),
        }
    }
}

/// Marker written in place of a failed action's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ErrorMarker {
    error: String,
}

impl From<&ActionError> for ErrorMarker {
    fn from(error: &ActionError) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// Outcome recorded for one action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum EntryValue {
    /// The action succeeded.
    Result(ActionResult),
    /// The action failed.
    Error(ErrorMarker),
}

/// One `(name, outcome)` pair of a response.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntry {
    name: String,
    value: EntryValue,
}

impl ResponseEntry {
    /// Action name the entry answers.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Ordered collection of action outcomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseDocument {
    entries: Vec<ResponseEntry>,
}

impl ResponseDocument {
    /// Creates an empty document with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Appends an action outcome. Failures become [`ErrorMarker`] entries.
    pub fn push(&mut self, name: impl Into<String>, outcome: Result<ActionResult, ActionError>) {
        let value = match outcome {
            Ok(result) => EntryValue::Result(result),
            Err(error) => EntryValue::Error(ErrorMarker::from(&error)),
        };
        self.entries.push(ResponseEntry {
            name: name.into(),
            value,
        });
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries were recorded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in submission order.
    #[must_use]
    pub fn entries(&self) -> &[ResponseEntry] {
        &self.entries
    }

    /// Renders the document as a JSON object literal.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::SerializeResponse` if an entry fails to encode.
    pub fn to_json(&self) -> Result<String, DispatchError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for ResponseDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn renders_each_result_shape() {
        let mut document = ResponseDocument::default();
        document.push("battery", Ok(ActionResult::Scalar("87".to_owned())));
        document.push(
            "sounds",
            Ok(ActionResult::List(vec!["horn".to_owned(), "bell".to_owned()])),
        );
        document.push("get", Ok(ActionResult::Object(json!({"streamVideo": true}))));
        document.push("buzz", Ok(ActionResult::Empty));

        assert_eq!(
            document.to_json().expect("render"),
            r#"{"battery":"87","sounds":["horn","bell"],"get":{"streamVideo":true},"buzz":[]}"#
        );
    }

    #[test]
    fn failures_render_as_error_objects() {
        let mut document = ResponseDocument::default();
        document.push("bogus", Err(ActionError::unknown_action("bogus")));

        assert_eq!(
            document.to_json().expect("render"),
            r#"{"bogus":{"error":"unknown action 'bogus'"}}"#
        );
    }

    #[test]
    fn duplicate_names_are_kept_in_order() {
        let mut document = ResponseDocument::default();
        document.push("battery", Ok(ActionResult::Scalar("10".to_owned())));
        document.push("screen", Ok(ActionResult::Scalar("1".to_owned())));
        document.push("battery", Ok(ActionResult::Scalar("11".to_owned())));

        assert_eq!(document.len(), 3);
        assert_eq!(
            document.to_json().expect("render"),
            r#"{"battery":"10","screen":"1","battery":"11"}"#
        );
    }

    #[test]
    fn empty_document_renders_empty_object() {
        let document = ResponseDocument::with_capacity(0);
        assert!(document.is_empty());
        assert_eq!(document.to_json().expect("render"), "{}");
    }

    #[test]
    fn object_rejects_non_object_reports() {
        assert!(matches!(
            ActionResult::object(&vec![1, 2]),
            Err(ActionError::Internal { .. })
        ));
    }
}
