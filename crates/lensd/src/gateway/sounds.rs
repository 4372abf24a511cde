//! Registry of playable sound assets.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// A named sound that can be played on the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundAsset {
    name: String,
    path: Option<Utf8PathBuf>,
}

impl SoundAsset {
    /// Creates an asset that is not backed by a file.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    /// Creates an asset backed by the file at `path`.
    #[must_use]
    pub fn with_path(name: impl Into<String>, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: Some(path.into()),
        }
    }

    /// Name clients use to refer to the asset.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }
}

/// Errors raised while enumerating sound assets.
#[derive(Debug, Error)]
pub enum SoundRegistryError {
    /// The sound directory could not be listed.
    #[error("failed to list sound directory '{path}': {source}")]
    ReadDirectory {
        /// Directory that failed.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Ordered collection of sound assets, fixed once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoundRegistry {
    assets: Vec<SoundAsset>,
}

impl SoundRegistry {
    /// Creates a registry from assets, keeping the first of any duplicate name.
    #[must_use]
    pub fn new(assets: impl IntoIterator<Item = SoundAsset>) -> Self {
        let mut unique: Vec<SoundAsset> = Vec::new();
        for asset in assets {
            if !unique.iter().any(|known| known.name == asset.name) {
                unique.push(asset);
            }
        }
        Self { assets: unique }
    }

    /// Creates a registry of file-less assets from names.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(names.into_iter().map(SoundAsset::named))
    }

    /// Scans `dir` for files whose extension is in `extensions`.
    ///
    /// Assets are named after the file stem and ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be listed.
    pub fn from_directory(dir: &Utf8Path, extensions: &[&str]) -> Result<Self, SoundRegistryError> {
        let read_error = |source| SoundRegistryError::ReadDirectory {
            path: dir.to_path_buf(),
            source,
        };

        let mut assets = Vec::new();
        for entry in dir.read_dir_utf8().map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let path = entry.path();
            let recognised = path.extension().is_some_and(|ext| {
                extensions
                    .iter()
                    .any(|candidate| candidate.eq_ignore_ascii_case(ext))
            });
            if !recognised || !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                assets.push(SoundAsset::with_path(stem, path));
            }
        }
        assets.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self::new(assets))
    }

    /// Asset names in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(SoundAsset::name)
    }

    /// Looks up an asset by exact name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&SoundAsset> {
        self.assets.iter().find(|asset| asset.name == name)
    }

    /// Number of registered assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Whether no assets are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn keeps_insertion_order_and_drops_duplicates() {
        let registry = SoundRegistry::from_names(["horn", "bell", "horn"]);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["horn", "bell"]);
    }

    #[test]
    fn finds_assets_by_exact_name() {
        let registry = SoundRegistry::from_names(["horn"]);
        assert!(registry.find("horn").is_some());
        assert!(registry.find("Horn").is_none());
    }

    #[test]
    fn scans_directory_for_audio_files() {
        let dir = TempDir::new().expect("temp dir");
        for file in ["whistle.ogg", "bark.WAV", "notes.txt"] {
            fs::write(dir.path().join(file), b"").expect("write asset");
        }
        fs::create_dir(dir.path().join("nested.ogg")).expect("create dir");

        let root = Utf8Path::from_path(dir.path()).expect("utf8 temp path");
        let registry = SoundRegistry::from_directory(root, &["ogg", "wav"]).expect("scan");

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["bark", "whistle"]);
        assert!(registry.find("bark").and_then(SoundAsset::path).is_some());
    }

    #[test]
    fn missing_directory_is_reported() {
        let result = SoundRegistry::from_directory(
            Utf8Path::new("/nonexistent/lensd-sounds"),
            &["ogg"],
        );
        assert!(matches!(
            result,
            Err(SoundRegistryError::ReadDirectory { .. })
        ));
    }
}
