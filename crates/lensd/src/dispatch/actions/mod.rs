//! Built-in action handlers.
//!
//! Every handler has the same shape: it receives the action's parameters and
//! the gateway, and returns an [`ActionResult`] or an [`ActionError`]. Handlers
//! never see other actions of the batch.

mod device;
mod settings;
mod status;

use std::str::FromStr;

use serde_json::{Map, Value};

use super::errors::ActionError;
use super::response::ActionResult;
use crate::gateway::Gateway;

pub(crate) use device::{buzz, play, sounds};
pub(crate) use settings::{get, set};
pub(crate) use status::{battery, clear, screen, state};

/// Signature shared by all action handlers.
pub(crate) type ActionHandler =
    fn(&Parameters<'_>, &dyn Gateway) -> Result<ActionResult, ActionError>;

/// Read-only view over an action's parameters.
///
/// Lookups report failures against the owning action and the full dotted path
/// of the parameter, so nested `settings` fields read as
/// `settings.video_quality`.
#[derive(Debug, Clone, Copy)]
pub struct Parameters<'a> {
    action: &'static str,
    prefix: Option<&'static str>,
    values: &'a Map<String, Value>,
}

impl<'a> Parameters<'a> {
    /// Wraps the parameters of `action`.
    #[must_use]
    pub const fn new(action: &'static str, values: &'a Map<String, Value>) -> Self {
        Self {
            action,
            prefix: None,
            values,
        }
    }

    fn path(&self, key: &str) -> String {
        match self.prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.to_owned(),
        }
    }

    fn value(&self, key: &str) -> Result<&'a Value, ActionError> {
        self.values
            .get(key)
            .ok_or_else(|| ActionError::missing_parameter(self.action, self.path(key)))
    }

    fn invalid(&self, key: &str, message: impl Into<String>) -> ActionError {
        ActionError::invalid_parameter(self.action, self.path(key), message)
    }

    /// Reads a required string parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing or not a string.
    pub fn string(&self, key: &str) -> Result<&'a str, ActionError> {
        match self.value(key)? {
            Value::String(text) => Ok(text),
            _ => Err(self.invalid(key, "expected a string")),
        }
    }

    /// Reads a required boolean parameter.
    ///
    /// The strings `"true"` and `"false"` are accepted as well, since form
    /// encoded clients send flags as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing or not a boolean.
    pub fn flag(&self, key: &str) -> Result<bool, ActionError> {
        match self.value(key)? {
            Value::Bool(flag) => Ok(*flag),
            Value::String(text) if text.eq_ignore_ascii_case("true") => Ok(true),
            Value::String(text) if text.eq_ignore_ascii_case("false") => Ok(false),
            _ => Err(self.invalid(key, "expected a boolean")),
        }
    }

    /// Reads a required string parameter and parses it with [`FromStr`].
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing, not a string, or rejected
    /// by the parser.
    pub fn parsed<T: FromStr>(&self, key: &str, what: &str) -> Result<T, ActionError> {
        let text = self.string(key)?;
        text.parse()
            .map_err(|_| self.invalid(key, format!("unsupported {what} '{text}'")))
    }

    /// Reads a required nested object parameter.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is missing or not an object.
    pub fn object(&self, key: &'static str) -> Result<Self, ActionError> {
        match self.value(key)? {
            Value::Object(values) => Ok(Self {
                action: self.action,
                prefix: Some(key),
                values,
            }),
            _ => Err(self.invalid(key, "expected an object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn missing_nested_parameter_reports_full_path() {
        let values = map(json!({"settings": {}}));
        let parameters = Parameters::new("set", &values);
        let settings = parameters.object("settings").expect("settings object");

        let error = settings.string("video_quality").expect_err("missing");
        assert_eq!(
            error.to_string(),
            "set: missing parameter 'settings.video_quality'"
        );
    }

    #[test]
    fn flags_accept_booleans_and_text() {
        let values = map(json!({"a": true, "b": "False", "c": 1}));
        let parameters = Parameters::new("set", &values);

        assert!(parameters.flag("a").expect("bool"));
        assert!(!parameters.flag("b").expect("text"));
        assert!(matches!(
            parameters.flag("c"),
            Err(ActionError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn strings_reject_other_types() {
        let values = map(json!({"name": 5}));
        let parameters = Parameters::new("play", &values);
        assert!(matches!(
            parameters.string("name"),
            Err(ActionError::InvalidParameter { .. })
        ));
    }
}
