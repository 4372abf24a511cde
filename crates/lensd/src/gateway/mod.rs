//! Device and configuration gateway.
//!
//! Actions never touch device state directly. Everything they read or change
//! goes through the [`Gateway`] trait: the persisted streaming configuration,
//! the live application state maintained by the host, the sound asset
//! registry, and the effect drivers. [`LocalGateway`] is the in-process
//! implementation wiring those collaborators together.

mod effects;
mod local;
mod preferences;
mod sounds;
mod state;

use std::time::Duration;

use thiserror::Error;

use crate::configuration::Configuration;

pub use effects::{DeviceError, SoundPlayer, TracingSoundPlayer, TracingVibrator, Vibrator};
pub use local::LocalGateway;
pub use preferences::{JsonFilePreferences, MemoryPreferences, PersistenceError, PreferenceStore};
pub use sounds::{SoundAsset, SoundRegistry, SoundRegistryError};
pub use state::{ApplicationState, LastError, StateStore};

/// Tracing target for gateway operations.
pub(crate) const GATEWAY_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::gateway");

/// Errors surfaced by gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The configuration could not be loaded or saved.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// A shared store was poisoned by a panicking writer.
    #[error("{resource} lock poisoned")]
    Poisoned {
        /// Which store was affected.
        resource: &'static str,
    },

    /// An effect driver failed.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

impl GatewayError {
    /// Creates a poisoned lock error.
    #[must_use]
    pub const fn poisoned(resource: &'static str) -> Self {
        Self::Poisoned { resource }
    }
}

/// Capabilities the dispatcher needs from the device.
///
/// Implementations must be safe to share between request threads. Writes to
/// the configuration are whole-value replacements and must be atomic with
/// respect to concurrent readers and writers.
pub trait Gateway: Send + Sync {
    /// Returns the current streaming configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if stored preferences cannot be loaded.
    fn read_configuration(&self) -> Result<Configuration, GatewayError>;

    /// Replaces the streaming configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Persistence` if the new value cannot be saved; the
    /// previous configuration stays in effect.
    fn write_configuration(&self, configuration: Configuration) -> Result<(), GatewayError>;

    /// Returns a snapshot of the live application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state store is unavailable.
    fn read_state(&self) -> Result<ApplicationState, GatewayError>;

    /// Forgets the last recorded application error.
    ///
    /// # Errors
    ///
    /// Returns an error if the state store is unavailable.
    fn clear_last_error(&self) -> Result<(), GatewayError>;

    /// Names of the playable sound assets, in registry order.
    fn list_sound_assets(&self) -> Vec<String>;

    /// Plays the named sound. Unknown names are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the player rejects a known asset.
    fn play_sound(&self, name: &str) -> Result<(), GatewayError>;

    /// Pulses the vibration motor for `duration`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vibrator driver fails.
    fn vibrate(&self, duration: Duration) -> Result<(), GatewayError>;
}
