//! Device effect drivers.
//!
//! The daemon only needs to trigger effects; how a sound reaches the speaker
//! or how the motor is pulsed belongs to the platform. The tracing drivers
//! shipped here record the request and succeed, which is what a headless host
//! without hardware wants.

use std::time::Duration;

use thiserror::Error;
use tracing::info;

use super::GATEWAY_TARGET;
use super::sounds::SoundAsset;

/// Failure reported by an effect driver.
#[derive(Debug, Error)]
#[error("{device} failed: {message}")]
pub struct DeviceError {
    device: &'static str,
    message: String,
}

impl DeviceError {
    /// Creates a driver failure for `device`.
    #[must_use]
    pub fn new(device: &'static str, message: impl Into<String>) -> Self {
        Self {
            device,
            message: message.into(),
        }
    }
}

/// Plays sound assets.
pub trait SoundPlayer: Send + Sync {
    /// Starts playback of `asset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses playback.
    fn play(&self, asset: &SoundAsset) -> Result<(), DeviceError>;
}

/// Drives the vibration motor.
pub trait Vibrator: Send + Sync {
    /// Pulses the motor for `duration`.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform refuses the pulse.
    fn vibrate(&self, duration: Duration) -> Result<(), DeviceError>;
}

/// Sound player that only logs playback requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSoundPlayer;

impl SoundPlayer for TracingSoundPlayer {
    fn play(&self, asset: &SoundAsset) -> Result<(), DeviceError> {
        info!(
            target: GATEWAY_TARGET,
            sound = asset.name(),
            path = asset.path().map(|p| p.as_str()),
            "playing sound"
        );
        Ok(())
    }
}

/// Vibrator that only logs pulse requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingVibrator;

impl Vibrator for TracingVibrator {
    fn vibrate(&self, duration: Duration) -> Result<(), DeviceError> {
        info!(
            target: GATEWAY_TARGET,
            duration_ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
            "vibrating"
        );
        Ok(())
    }
}
