//! In-process gateway backed by injected stores and drivers.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info};

use crate::configuration::Configuration;

use super::effects::{SoundPlayer, TracingSoundPlayer, TracingVibrator, Vibrator};
use super::preferences::PreferenceStore;
use super::sounds::SoundRegistry;
use super::state::{ApplicationState, StateStore};
use super::{GATEWAY_TARGET, Gateway, GatewayError};

/// Gateway composed from a preference store, a shared state store, a sound
/// registry and effect drivers.
///
/// The configuration is loaded lazily on first read and cached. A single mutex
/// guards both the cache and the persistence call, so a `set` from one
/// request can never interleave with another.
pub struct LocalGateway {
    preferences: Box<dyn PreferenceStore>,
    configuration: Mutex<Option<Configuration>>,
    state: Arc<StateStore>,
    sounds: SoundRegistry,
    player: Box<dyn SoundPlayer>,
    vibrator: Box<dyn Vibrator>,
}

impl LocalGateway {
    /// Creates a gateway with no sounds and tracing-only effect drivers.
    #[must_use]
    pub fn new(preferences: impl PreferenceStore + 'static, state: Arc<StateStore>) -> Self {
        Self {
            preferences: Box::new(preferences),
            configuration: Mutex::new(None),
            state,
            sounds: SoundRegistry::default(),
            player: Box::new(TracingSoundPlayer),
            vibrator: Box::new(TracingVibrator),
        }
    }

    /// Replaces the sound registry.
    #[must_use]
    pub fn with_sounds(mut self, sounds: SoundRegistry) -> Self {
        self.sounds = sounds;
        self
    }

    /// Replaces the sound player.
    #[must_use]
    pub fn with_player(mut self, player: impl SoundPlayer + 'static) -> Self {
        self.player = Box::new(player);
        self
    }

    /// Replaces the vibration driver.
    #[must_use]
    pub fn with_vibrator(mut self, vibrator: impl Vibrator + 'static) -> Self {
        self.vibrator = Box::new(vibrator);
        self
    }
}

impl Gateway for LocalGateway {
    fn read_configuration(&self) -> Result<Configuration, GatewayError> {
        let mut cached = self
            .configuration
            .lock()
            .map_err(|_| GatewayError::poisoned("configuration"))?;
        if let Some(configuration) = *cached {
            return Ok(configuration);
        }

        let loaded = self.preferences.load()?;
        if loaded.is_none() {
            debug!(target: GATEWAY_TARGET, "using default configuration");
        }
        let configuration = loaded.unwrap_or_default();
        *cached = Some(configuration);
        Ok(configuration)
    }

    fn write_configuration(&self, configuration: Configuration) -> Result<(), GatewayError> {
        let mut cached = self
            .configuration
            .lock()
            .map_err(|_| GatewayError::poisoned("configuration"))?;
        self.preferences.save(&configuration)?;
        *cached = Some(configuration);

        info!(
            target: GATEWAY_TARGET,
            stream_video = configuration.stream_video,
            stream_audio = configuration.stream_audio,
            video_encoder = %configuration.video_encoder,
            audio_encoder = %configuration.audio_encoder,
            video_quality = %configuration.video_quality,
            "configuration updated"
        );
        Ok(())
    }

    fn read_state(&self) -> Result<ApplicationState, GatewayError> {
        self.state.snapshot()
    }

    fn clear_last_error(&self) -> Result<(), GatewayError> {
        self.state.clear_last_error()
    }

    fn list_sound_assets(&self) -> Vec<String> {
        self.sounds.names().map(str::to_owned).collect()
    }

    fn play_sound(&self, name: &str) -> Result<(), GatewayError> {
        match self.sounds.find(name) {
            Some(asset) => Ok(self.player.play(asset)?),
            None => {
                debug!(target: GATEWAY_TARGET, sound = name, "ignoring unknown sound");
                Ok(())
            }
        }
    }

    fn vibrate(&self, duration: Duration) -> Result<(), GatewayError> {
        Ok(self.vibrator.vibrate(duration)?)
    }
}
