//! Parsing of compact video quality strings.
//!
//! Clients describe the desired video quality as
//! `<kbps>-<fps>-<width>-<height>`, for example `500-20-176-144`. Every field
//! is a positive decimal integer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Resolution {
    /// Horizontal pixel count.
    pub width: u32,
    /// Vertical pixel count.
    pub height: u32,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Resolution, framerate and bitrate of the video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct VideoQuality {
    /// Frame dimensions.
    pub resolution: Resolution,
    /// Frames per second.
    pub framerate: u32,
    /// Target bitrate in kilobits per second.
    pub bitrate_kbps: u32,
}

impl VideoQuality {
    /// Quality used until a client configures one.
    pub const DEFAULT: Self = Self {
        resolution: Resolution {
            width: 176,
            height: 144,
        },
        framerate: 20,
        bitrate_kbps: 500,
    };
}

impl Default for VideoQuality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fields of a quality string, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum QualityField {
    /// Bitrate in kbps.
    Bitrate,
    /// Frames per second.
    Framerate,
    /// Frame width.
    Width,
    /// Frame height.
    Height,
}

const FIELDS: [QualityField; 4] = [
    QualityField::Bitrate,
    QualityField::Framerate,
    QualityField::Width,
    QualityField::Height,
];

/// Errors raised while parsing a quality string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualityParseError {
    /// The string did not contain exactly four `-` separated fields.
    #[error("quality '{input}' must have the form <kbps>-<fps>-<width>-<height>")]
    FieldCount {
        /// The rejected input.
        input: String,
    },
    /// A field was not a positive integer.
    #[error("quality '{input}' has an invalid {field}: '{value}'")]
    InvalidField {
        /// The rejected input.
        input: String,
        /// Which field failed.
        field: QualityField,
        /// The offending text.
        value: String,
    },
}

impl FromStr for VideoQuality {
    type Err = QualityParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = input.trim().split('-').collect();
        if parts.len() != FIELDS.len() {
            return Err(QualityParseError::FieldCount {
                input: input.to_owned(),
            });
        }

        let mut values = [0_u32; 4];
        for ((slot, part), field) in values.iter_mut().zip(&parts).zip(FIELDS) {
            *slot = parse_field(input, field, part)?;
        }
        let [bitrate_kbps, framerate, width, height] = values;

        Ok(Self {
            resolution: Resolution { width, height },
            framerate,
            bitrate_kbps,
        })
    }
}

fn parse_field(input: &str, field: QualityField, value: &str) -> Result<u32, QualityParseError> {
    let invalid = || QualityParseError::InvalidField {
        input: input.to_owned(),
        field,
        value: value.to_owned(),
    };
    // `u32::from_str` accepts a leading '+', which the wire format does not.
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match value.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(parsed) => Ok(parsed),
    }
}

impl fmt::Display for VideoQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.bitrate_kbps, self.framerate, self.resolution.width, self.resolution.height
        )
    }
}
