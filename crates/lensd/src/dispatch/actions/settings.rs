//! Reading and replacing the streaming configuration.

use serde::Serialize;

use super::Parameters;
use crate::configuration::{AudioEncoder, Configuration, VideoEncoder};
use crate::dispatch::errors::ActionError;
use crate::dispatch::response::ActionResult;
use crate::gateway::Gateway;
use crate::quality::VideoQuality;

/// Wire form of the configuration returned by `get`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigurationReport {
    stream_audio: bool,
    audio_encoder: String,
    stream_video: bool,
    video_encoder: String,
    video_resolution: String,
    video_framerate: String,
    video_bitrate: String,
}

impl From<&Configuration> for ConfigurationReport {
    fn from(configuration: &Configuration) -> Self {
        let quality = &configuration.video_quality;
        Self {
            stream_audio: configuration.stream_audio,
            audio_encoder: configuration.audio_encoder.to_string(),
            stream_video: configuration.stream_video,
            video_encoder: configuration.video_encoder.to_string(),
            video_resolution: quality.resolution.to_string(),
            video_framerate: format!("{} fps", quality.framerate),
            video_bitrate: format!("{} kbps", quality.bitrate_kbps),
        }
    }
}

/// Returns the current configuration.
pub(crate) fn get(
    _parameters: &Parameters<'_>,
    gateway: &dyn Gateway,
) -> Result<ActionResult, ActionError> {
    let configuration = gateway.read_configuration()?;
    ActionResult::object(&ConfigurationReport::from(&configuration))
}

/// Replaces the configuration with the `settings` object.
///
/// Every field is validated before anything is written, so a rejected
/// request leaves the stored configuration as it was.
pub(crate) fn set(
    parameters: &Parameters<'_>,
    gateway: &dyn Gateway,
) -> Result<ActionResult, ActionError> {
    let settings = parameters.object("settings")?;
    let configuration = Configuration {
        stream_video: settings.flag("stream_video")?,
        stream_audio: settings.flag("stream_audio")?,
        video_encoder: settings.parsed::<VideoEncoder>("video_encoder", "video encoder")?,
        audio_encoder: settings.parsed::<AudioEncoder>("audio_encoder", "audio encoder")?,
        video_quality: settings.string("video_quality")?.parse::<VideoQuality>()?,
    };

    gateway.write_configuration(configuration)?;
    Ok(ActionResult::Empty)
}
