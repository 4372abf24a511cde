//! Remote control daemon for a mobile streaming camera.
//!
//! Clients drive the device by sending JSON action documents: a single
//! `{"action": "..."}` object or an ordered array of them. The [`Dispatcher`]
//! resolves each action against a fixed registry, executes it through the
//! [`Gateway`](gateway::Gateway) and answers with one JSON object whose keys
//! are the action names in submission order.
//!
//! The crate is organised bottom-up:
//!
//! - [`quality`] and [`configuration`] model the persisted streaming settings.
//! - [`gateway`] owns every side effect: preference persistence, live
//!   application state, sound assets and the vibration motor.
//! - [`dispatch`] parses requests, runs actions and renders responses.
//! - [`bootstrap`] wires configuration, telemetry and the local gateway into
//!   a ready [`Service`].

pub mod bootstrap;
pub mod configuration;
pub mod dispatch;
pub mod gateway;
pub mod quality;
pub mod telemetry;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Service, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use configuration::{AudioEncoder, Configuration, VideoEncoder};
pub use dispatch::{Dispatcher, INVALID_REQUEST, LineHandler};
pub use quality::{QualityParseError, Resolution, VideoQuality};
pub use telemetry::TelemetryError;

#[cfg(test)]
mod tests;
