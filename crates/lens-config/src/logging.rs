//! Log output selection.
//!
//! Standard output carries the response stream, one answer per line, so the
//! daemon's logs always go to standard error. The format only decides how
//! each event is rendered there.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Rendering of log events on standard error.
///
/// Parsed case-insensitively from `json` or `compact`, so
/// `LENSD_LOG_FORMAT=Compact` and `--log-format compact` both work.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One flattened JSON object per event, for a supervising process that
    /// collects stderr.
    #[default]
    Json,
    /// Single-line text for an operator watching the terminal.
    Compact,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::lower("compact", LogFormat::Compact)]
    #[case::title("Compact", LogFormat::Compact)]
    #[case::upper("JSON", LogFormat::Json)]
    fn parses_any_case(#[case] input: &str, #[case] expected: LogFormat) {
        assert_eq!(LogFormat::from_str(input).expect("parse format"), expected);
    }

    #[rstest]
    #[case::pretty("pretty")]
    #[case::empty("")]
    fn rejects_unsupported_formats(#[case] input: &str) {
        assert!(LogFormat::from_str(input).is_err());
    }

    #[test]
    fn displays_the_configuration_spelling() {
        assert_eq!(LogFormat::Compact.to_string(), "compact");
        assert_eq!(LogFormat::default().to_string(), "json");
    }
}
