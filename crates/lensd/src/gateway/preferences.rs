//! Persistence of the streaming configuration.

use std::fs;
use std::io;
use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::configuration::Configuration;

use super::GATEWAY_TARGET;

/// Errors raised while loading or saving preferences.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The preference file exists but could not be read.
    #[error("failed to read preferences '{path}': {source}")]
    Read {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The preference file could not be written.
    #[error("failed to write preferences '{path}': {source}")]
    Write {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The preference file does not contain a valid configuration.
    #[error("preferences '{path}' are not valid: {source}")]
    Decode {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The configuration could not be encoded.
    #[error("failed to encode preferences: {0}")]
    Encode(#[source] serde_json::Error),
    /// The backing store is unusable.
    #[error("preference store unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

/// Storage for the streaming configuration.
pub trait PreferenceStore: Send + Sync {
    /// Loads the stored configuration, or `None` when nothing has been saved.
    ///
    /// # Errors
    ///
    /// Returns an error when stored data exists but cannot be read.
    fn load(&self) -> Result<Option<Configuration>, PersistenceError>;

    /// Replaces the stored configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration cannot be written.
    fn save(&self, configuration: &Configuration) -> Result<(), PersistenceError>;
}

/// Keeps preferences in process memory only.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    stored: Mutex<Option<Configuration>>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> Result<Option<Configuration>, PersistenceError> {
        self.stored
            .lock()
            .map(|stored| *stored)
            .map_err(|_| PersistenceError::Unavailable {
                message: "memory store lock poisoned".to_owned(),
            })
    }

    fn save(&self, configuration: &Configuration) -> Result<(), PersistenceError> {
        let mut stored = self
            .stored
            .lock()
            .map_err(|_| PersistenceError::Unavailable {
                message: "memory store lock poisoned".to_owned(),
            })?;
        *stored = Some(*configuration);
        Ok(())
    }
}

/// Stores preferences as a JSON document on disk.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so readers never observe a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFilePreferences {
    path: Utf8PathBuf,
}

impl JsonFilePreferences {
    /// Creates a store backed by `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the preference file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn write_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn load(&self) -> Result<Option<Configuration>, PersistenceError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(target: GATEWAY_TARGET, path = %self.path, "no stored preferences");
                return Ok(None);
            }
            Err(source) => {
                return Err(PersistenceError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| PersistenceError::Decode {
                path: self.path.clone(),
                source,
            })
    }

    fn save(&self, configuration: &Configuration) -> Result<(), PersistenceError> {
        let encoded =
            serde_json::to_vec_pretty(configuration).map_err(PersistenceError::Encode)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| self.write_error(source))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encoded).map_err(|source| self.write_error(source))?;
        fs::rename(&tmp, &self.path).map_err(|source| self.write_error(source))?;

        debug!(target: GATEWAY_TARGET, path = %self.path, "preferences saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;
    use crate::configuration::VideoEncoder;

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn store_in(dir: &TempDir) -> JsonFilePreferences {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("nested").join("prefs.json"))
            .expect("utf8 temp path");
        JsonFilePreferences::new(path)
    }

    #[rstest]
    fn missing_file_loads_nothing(temp_dir: TempDir) {
        let store = store_in(&temp_dir);
        assert!(store.load().expect("load").is_none());
    }

    #[rstest]
    fn saved_configuration_is_reloaded(temp_dir: TempDir) {
        let store = store_in(&temp_dir);
        let configuration = Configuration {
            video_encoder: VideoEncoder::H264,
            stream_audio: true,
            ..Configuration::default()
        };

        store.save(&configuration).expect("save");
        let reopened = JsonFilePreferences::new(store.path());

        assert_eq!(reopened.load().expect("load"), Some(configuration));
    }

    #[rstest]
    fn corrupt_file_is_reported(temp_dir: TempDir) {
        let store = store_in(&temp_dir);
        store.save(&Configuration::default()).expect("save");
        fs::write(store.path(), b"{ not json").expect("corrupt file");

        assert!(matches!(
            store.load(),
            Err(PersistenceError::Decode { .. })
        ));
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryPreferences::new();
        assert!(store.load().expect("load").is_none());

        let configuration = Configuration {
            stream_video: false,
            ..Configuration::default()
        };
        store.save(&configuration).expect("save");
        assert_eq!(store.load().expect("load"), Some(configuration));
    }
}
