//! Remote-control request dispatch.
//!
//! This module turns a request document into a response document. Clients
//! send either one action object or an array of them:
//!
//! ```json
//! [{"action":"battery"},{"action":"play","name":"horn"},{"action":"get"}]
//! ```
//!
//! and receive one JSON object keyed by action name, in submission order:
//!
//! ```json
//! {"battery":"87","play":[],"get":{"streamAudio":false,"audioEncoder":"AMR-NB"}}
//! ```
//!
//! ## Failure handling
//!
//! A request that cannot be decoded is rejected as a whole with the
//! [`INVALID_REQUEST`] sentinel before any action runs. Once a request is
//! accepted, each action is isolated: unknown names, bad parameters and
//! gateway failures produce `{"error": "..."}` in that action's slot while the
//! remaining actions still execute.

mod actions;
mod dispatcher;
mod errors;
mod handler;
mod registry;
mod request;
mod response;

pub use self::actions::Parameters;
pub use self::dispatcher::Dispatcher;
pub use self::errors::{ActionError, DispatchError, INVALID_REQUEST};
pub use self::handler::LineHandler;
pub use self::registry::ActionKind;
pub use self::request::{ActionRequest, BatchRequest};
pub use self::response::{ActionResult, ResponseDocument, ResponseEntry};
