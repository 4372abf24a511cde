//! Shared configuration for the lens control daemon.
//!
//! Values are layered by `ortho_config`: built-in defaults, then a discovered
//! `lensd.toml`, then `LENSD_*` environment variables, then command-line
//! flags. The daemon only needs a handful of knobs: how to log, where the
//! device preferences are persisted and where the sound assets live.

mod defaults;
mod logging;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_SOUND_EXTENSIONS, default_log_filter_string, default_log_format,
};
pub use logging::LogFormat;

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "LENSD")]
pub struct Config {
    /// Tracing filter expression, for example `info` or `lensd=debug`.
    #[ortho_config(default = defaults::default_log_filter_string())]
    #[serde(default = "defaults::default_log_filter_string")]
    pub log_filter: String,
    /// Output format for structured logs.
    #[ortho_config(default = defaults::default_log_format())]
    #[serde(default = "defaults::default_log_format")]
    pub log_format: LogFormat,
    /// JSON file holding the persisted device preferences. Preferences are
    /// kept in memory only when unset.
    #[serde(default)]
    pub preferences_path: Option<Utf8PathBuf>,
    /// Directory scanned for playable sound assets at start-up.
    #[serde(default)]
    pub sounds_dir: Option<Utf8PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: defaults::default_log_filter_string(),
            log_format: defaults::default_log_format(),
            preferences_path: None,
            sounds_dir: None,
        }
    }
}

impl Config {
    /// Tracing filter expression for the daemon.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Selected log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Location of the persisted preference file, if any.
    #[must_use]
    pub fn preferences_path(&self) -> Option<&Utf8Path> {
        self.preferences_path.as_deref()
    }

    /// Directory holding sound assets, if any.
    #[must_use]
    pub fn sounds_dir(&self) -> Option<&Utf8Path> {
        self.sounds_dir.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_logs_json_at_info() {
        let config = Config::default();
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format(), LogFormat::Json);
    }

    #[test]
    fn default_config_keeps_preferences_in_memory() {
        let config = Config::default();
        assert!(config.preferences_path().is_none());
        assert!(config.sounds_dir().is_none());
    }
}
