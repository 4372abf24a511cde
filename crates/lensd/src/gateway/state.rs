//! Live application state shared between the host and the dispatcher.

use std::sync::RwLock;

use super::GatewayError;

/// The most recent failure recorded by the host application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastError {
    /// Type name of the failure, e.g. `CameraInUseError`.
    pub kind: String,
    /// Human readable message, when the failure carried one.
    pub message: Option<String>,
    /// Stack frames, innermost first, already rendered as text.
    pub frames: Vec<String>,
}

impl LastError {
    /// Creates an error record without stack frames.
    #[must_use]
    pub fn new(kind: impl Into<String>, message: Option<String>) -> Self {
        Self {
            kind: kind.into(),
            message,
            frames: Vec::new(),
        }
    }

    /// Attaches stack frames to the record.
    #[must_use]
    pub fn with_frames<I, S>(mut self, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frames = frames.into_iter().map(Into::into).collect();
        self
    }
}

/// Snapshot of the application's live state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationState {
    /// Whether the application UI is in the foreground.
    pub foreground: bool,
    /// Battery charge in percent.
    pub battery_level: u8,
    /// Last failure, until a client clears it.
    pub last_error: Option<LastError>,
    /// Whether a stream currently holds the camera.
    pub camera_in_use: bool,
    /// Whether a stream currently holds the microphone.
    pub microphone_in_use: bool,
}

/// Thread-safe holder of [`ApplicationState`].
///
/// The host updates the store through the setters; the dispatcher only takes
/// snapshots and clears the last error.
#[derive(Debug, Default)]
pub struct StateStore {
    inner: RwLock<ApplicationState>,
}

impl StateStore {
    /// Returns a copy of the current state.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Poisoned` if a writer panicked.
    pub fn snapshot(&self) -> Result<ApplicationState, GatewayError> {
        self.inner
            .read()
            .map(|state| state.clone())
            .map_err(|_| GatewayError::poisoned("application state"))
    }

    /// Forgets the last recorded error.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Poisoned` if a writer panicked.
    pub fn clear_last_error(&self) -> Result<(), GatewayError> {
        self.update(|state| state.last_error = None)
    }

    /// Records whether the application is in the foreground.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Poisoned` if a writer panicked.
    pub fn set_foreground(&self, foreground: bool) -> Result<(), GatewayError> {
        self.update(|state| state.foreground = foreground)
    }

    /// Records the battery level, clamped to 100 percent.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Poisoned` if a writer panicked.
    pub fn set_battery_level(&self, percent: u8) -> Result<(), GatewayError> {
        self.update(|state| state.battery_level = percent.min(100))
    }

    /// Records a failure, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Poisoned` if a writer panicked.
    pub fn record_error(&self, error: LastError) -> Result<(), GatewayError> {
        self.update(|state| state.last_error = Some(error))
    }

    /// Records whether the camera is held by a stream.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Poisoned` if a writer panicked.
    pub fn set_camera_in_use(&self, in_use: bool) -> Result<(), GatewayError> {
        self.update(|state| state.camera_in_use = in_use)
    }

    /// Records whether the microphone is held by a stream.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Poisoned` if a writer panicked.
    pub fn set_microphone_in_use(&self, in_use: bool) -> Result<(), GatewayError> {
        self.update(|state| state.microphone_in_use = in_use)
    }

    fn update(&self, apply: impl FnOnce(&mut ApplicationState)) -> Result<(), GatewayError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| GatewayError::poisoned("application state"))?;
        apply(&mut state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_removes_recorded_error() {
        let store = StateStore::default();
        store
            .record_error(LastError::new("IOException", Some("camera busy".to_owned())))
            .expect("record");
        assert!(store.snapshot().expect("snapshot").last_error.is_some());

        store.clear_last_error().expect("clear");
        assert!(store.snapshot().expect("snapshot").last_error.is_none());
    }

    #[test]
    fn battery_level_is_clamped() {
        let store = StateStore::default();
        store.set_battery_level(250).expect("set battery");
        assert_eq!(store.snapshot().expect("snapshot").battery_level, 100);
    }

    #[test]
    fn setters_update_snapshot() {
        let store = StateStore::default();
        store.set_foreground(true).expect("foreground");
        store.set_camera_in_use(true).expect("camera");
        store.set_microphone_in_use(true).expect("microphone");

        let state = store.snapshot().expect("snapshot");
        assert!(state.foreground);
        assert!(state.camera_in_use);
        assert!(state.microphone_in_use);
    }
}
