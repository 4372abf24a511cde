//! Batch execution.
//!
//! The dispatcher runs each action of a batch in order against the gateway
//! and records one response entry per action. A failing action only affects
//! its own entry; the rest of the batch still runs.

use std::sync::Arc;

use tracing::{debug, warn};

use super::actions::Parameters;
use super::errors::{ActionError, DispatchError, INVALID_REQUEST};
use super::registry::{ActionKind, DISPATCH_TARGET};
use super::request::{ActionRequest, BatchRequest};
use super::response::{ActionResult, ResponseDocument};
use crate::gateway::Gateway;

/// Executes action batches against a gateway.
#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn Gateway>,
}

impl Dispatcher {
    /// Creates a dispatcher over `gateway`.
    #[must_use]
    pub const fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// Handles a raw request and returns the text to send back.
    ///
    /// This is the transport-facing entry point: it never fails. Requests that
    /// cannot be decoded yield the [`INVALID_REQUEST`] sentinel.
    #[must_use]
    pub fn handle(&self, raw: &[u8]) -> String {
        match self.dispatch(raw).and_then(|document| document.to_json()) {
            Ok(answer) => {
                debug!(
                    target: DISPATCH_TARGET,
                    request = %String::from_utf8_lossy(raw).trim_end(),
                    answer = %answer,
                    "request handled"
                );
                answer
            }
            Err(error) if error.is_invalid_request() => {
                warn!(
                    target: DISPATCH_TARGET,
                    %error,
                    request = %String::from_utf8_lossy(raw).trim_end(),
                    "invalid request"
                );
                INVALID_REQUEST.to_owned()
            }
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "failed to render response");
                INVALID_REQUEST.to_owned()
            }
        }
    }

    /// Parses and executes a raw request.
    ///
    /// # Errors
    ///
    /// Returns a `DispatchError` when the request cannot be decoded; in that
    /// case no action has run.
    pub fn dispatch(&self, raw: &[u8]) -> Result<ResponseDocument, DispatchError> {
        let batch = BatchRequest::parse(raw)?;
        Ok(self.execute(&batch))
    }

    /// Executes every action of `batch` in order.
    #[must_use]
    pub fn execute(&self, batch: &BatchRequest) -> ResponseDocument {
        let mut document = ResponseDocument::with_capacity(batch.len());
        for request in batch.iter() {
            let outcome = self.run_action(request);
            if let Err(error) = &outcome {
                warn!(
                    target: DISPATCH_TARGET,
                    action = request.name(),
                    %error,
                    "action failed"
                );
            }
            document.push(request.name(), outcome);
        }
        document
    }

    fn run_action(&self, request: &ActionRequest) -> Result<ActionResult, ActionError> {
        let kind = ActionKind::lookup(request.name())?;
        debug!(target: DISPATCH_TARGET, action = kind.as_str(), "running action");

        let parameters = Parameters::new(kind.as_str(), request.parameters());
        kind.handler()(&parameters, self.gateway.as_ref())
    }
}
