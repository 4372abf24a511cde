//! Application state queries.

use serde::Serialize;

use super::Parameters;
use crate::dispatch::errors::ActionError;
use crate::dispatch::response::ActionResult;
use crate::gateway::{Gateway, LastError};

/// Separator between entries of a flattened stack trace.
pub(crate) const STACK_TRACE_SEPARATOR: &str = "||";

/// Wire form of the state returned by `state`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StateReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    last_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_stack_trace: Option<String>,
    camera_in_use: String,
    microphone_in_use: String,
    // Foreground bit.
    activity_paused: &'static str,
}

const fn digit(flag: bool) -> &'static str {
    if flag { "1" } else { "0" }
}

fn error_message(error: &LastError) -> &str {
    error.message.as_deref().unwrap_or("unknown error")
}

/// Renders `kind : message||at frame||at frame||`, with `null` standing in
/// for a missing message.
fn flatten_trace(error: &LastError) -> String {
    let message = error.message.as_deref().unwrap_or("null");
    let mut trace = format!("{} : {message}{STACK_TRACE_SEPARATOR}", error.kind);
    for frame in &error.frames {
        trace.push_str("at ");
        trace.push_str(frame);
        trace.push_str(STACK_TRACE_SEPARATOR);
    }
    trace
}

/// Reports `"1"` when the application is in the foreground, `"0"` otherwise.
pub(crate) fn screen(
    _parameters: &Parameters<'_>,
    gateway: &dyn Gateway,
) -> Result<ActionResult, ActionError> {
    let state = gateway.read_state()?;
    Ok(ActionResult::Scalar(digit(state.foreground).to_owned()))
}

/// Reports device usage and the last recorded error.
pub(crate) fn state(
    _parameters: &Parameters<'_>,
    gateway: &dyn Gateway,
) -> Result<ActionResult, ActionError> {
    let state = gateway.read_state()?;
    let report = StateReport {
        last_error: state
            .last_error
            .as_ref()
            .map(|error| error_message(error).to_owned()),
        last_stack_trace: state.last_error.as_ref().map(flatten_trace),
        camera_in_use: state.camera_in_use.to_string(),
        microphone_in_use: state.microphone_in_use.to_string(),
        activity_paused: digit(state.foreground),
    };
    ActionResult::object(&report)
}

/// Forgets the last recorded error.
pub(crate) fn clear(
    _parameters: &Parameters<'_>,
    gateway: &dyn Gateway,
) -> Result<ActionResult, ActionError> {
    gateway.clear_last_error()?;
    Ok(ActionResult::Empty)
}

/// Reports the battery level in percent.
pub(crate) fn battery(
    _parameters: &Parameters<'_>,
    gateway: &dyn Gateway,
) -> Result<ActionResult, ActionError> {
    let state = gateway.read_state()?;
    Ok(ActionResult::Scalar(state.battery_level.to_string()))
}
