//! Service bootstrap.
//!
//! Loads configuration, installs telemetry and assembles the local gateway
//! and dispatcher. Collaborators that touch the process environment sit
//! behind [`ConfigLoader`] so tests can supply a ready-made configuration.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;
use tracing::info;

use lens_config::{Config, DEFAULT_SOUND_EXTENSIONS};

use crate::dispatch::{Dispatcher, LineHandler};
use crate::gateway::{
    GATEWAY_TARGET, JsonFilePreferences, LocalGateway, MemoryPreferences, SoundRegistry,
    SoundRegistryError, StateStore,
};
use crate::telemetry::{self, TelemetryError};

/// Abstracts configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the service configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The sound directory could not be scanned.
    #[error("failed to load sound assets: {source}")]
    Sounds {
        /// Underlying registry error.
        #[source]
        source: SoundRegistryError,
    },
}

/// A bootstrapped service ready to answer requests.
pub struct Service {
    dispatcher: Dispatcher,
    state: Arc<StateStore>,
}

impl Service {
    /// Dispatcher bound to the local gateway.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Live application state shared with the gateway.
    ///
    /// Platform integrations update foreground, battery and device usage
    /// through this handle.
    #[must_use]
    pub const fn state(&self) -> &Arc<StateStore> {
        &self.state
    }

    /// Line handler serving this service's dispatcher.
    #[must_use]
    pub fn line_handler(&self) -> LineHandler {
        LineHandler::new(self.dispatcher.clone())
    }
}

/// Bootstraps the service using the supplied configuration loader.
///
/// # Errors
///
/// Returns a [`BootstrapError`] naming the stage that failed.
pub fn bootstrap_with(loader: &dyn ConfigLoader) -> Result<Service, BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;

    let state = Arc::new(StateStore::default());
    let gateway = build_gateway(&config, Arc::clone(&state))?;
    let dispatcher = Dispatcher::new(Arc::new(gateway));

    info!(
        target: GATEWAY_TARGET,
        preferences = config.preferences_path().map_or("memory", |path| path.as_str()),
        sounds = config.sounds_dir().map_or("none", |path| path.as_str()),
        "service ready"
    );

    Ok(Service { dispatcher, state })
}

fn build_gateway(config: &Config, state: Arc<StateStore>) -> Result<LocalGateway, BootstrapError> {
    let gateway = match config.preferences_path() {
        Some(path) => LocalGateway::new(JsonFilePreferences::new(path), state),
        None => LocalGateway::new(MemoryPreferences::new(), state),
    };

    let Some(dir) = config.sounds_dir() else {
        return Ok(gateway);
    };
    let sounds = SoundRegistry::from_directory(dir, DEFAULT_SOUND_EXTENSIONS)
        .map_err(|source| BootstrapError::Sounds { source })?;
    info!(target: GATEWAY_TARGET, count = sounds.len(), dir = %dir, "sound assets loaded");
    Ok(gateway.with_sounds(sounds))
}
