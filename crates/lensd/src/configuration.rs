//! Streaming configuration persisted across requests.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::quality::VideoQuality;

/// Video codec used for the stream.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum VideoEncoder {
    /// H.263 baseline.
    #[default]
    #[strum(to_string = "H.263", serialize = "H263")]
    H263,
    /// H.264 / AVC.
    #[strum(to_string = "H.264", serialize = "H264")]
    H264,
}

/// Audio codec used for the stream.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive)]
pub enum AudioEncoder {
    /// Adaptive multi-rate narrowband.
    #[default]
    #[strum(to_string = "AMR-NB", serialize = "AMRNB")]
    AmrNb,
    /// Advanced audio coding.
    #[strum(to_string = "AAC")]
    Aac,
}

/// Device streaming configuration.
///
/// Only the `set` action replaces it; every field is overwritten at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Configuration {
    /// Whether video is streamed.
    pub stream_video: bool,
    /// Whether audio is streamed.
    pub stream_audio: bool,
    /// Video codec.
    pub video_encoder: VideoEncoder,
    /// Audio codec.
    pub audio_encoder: AudioEncoder,
    /// Resolution, framerate and bitrate.
    pub video_quality: VideoQuality,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            stream_video: true,
            stream_audio: false,
            video_encoder: VideoEncoder::default(),
            audio_encoder: AudioEncoder::default(),
            video_quality: VideoQuality::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::display("H.263", VideoEncoder::H263)]
    #[case::display_264("H.264", VideoEncoder::H264)]
    #[case::alias("h264", VideoEncoder::H264)]
    fn parses_video_encoder(#[case] input: &str, #[case] expected: VideoEncoder) {
        assert_eq!(input.parse::<VideoEncoder>().expect("parse"), expected);
    }

    #[rstest]
    #[case::display("AMR-NB", AudioEncoder::AmrNb)]
    #[case::alias("amrnb", AudioEncoder::AmrNb)]
    #[case::aac("aac", AudioEncoder::Aac)]
    fn parses_audio_encoder(#[case] input: &str, #[case] expected: AudioEncoder) {
        assert_eq!(input.parse::<AudioEncoder>().expect("parse"), expected);
    }

    #[test]
    fn rejects_unknown_encoders() {
        assert!("VP8".parse::<VideoEncoder>().is_err());
        assert!("opus".parse::<AudioEncoder>().is_err());
    }

    #[test]
    fn encoders_display_wire_names() {
        assert_eq!(VideoEncoder::H263.to_string(), "H.263");
        assert_eq!(AudioEncoder::AmrNb.to_string(), "AMR-NB");
        assert_eq!(AudioEncoder::Aac.to_string(), "AAC");
    }

    #[test]
    fn defaults_stream_video_only() {
        let configuration = Configuration::default();
        assert!(configuration.stream_video);
        assert!(!configuration.stream_audio);
    }
}
