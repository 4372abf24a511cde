//! Built-in configuration values.

use crate::logging::LogFormat;

/// Log filter applied when none is configured.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// File extensions recognised as sound assets when scanning a directory.
pub const DEFAULT_SOUND_EXTENSIONS: &[&str] = &["ogg", "wav", "mp3", "amr"];

/// Owned form of [`DEFAULT_LOG_FILTER`] for serde and `ortho_config` defaults.
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Log format applied when none is configured.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
