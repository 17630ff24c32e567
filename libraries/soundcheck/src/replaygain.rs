//! ReplayGain values as read from tags

use crate::error::{Result, SoundCheckError};
use std::fmt;

/// Which ReplayGain scope a value was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GainScope {
    Track,
    Album,
}

impl GainScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Track => "track",
            Self::Album => "album",
        }
    }
}

impl fmt::Display for GainScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ReplayGain information extracted from a file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayGainValue {
    /// Gain in dB
    pub gain_db: f64,
    /// Peak amplitude (linear). Informational only, never encoded.
    pub peak: f64,
    /// Scope the values were resolved from
    pub scope: GainScope,
}

impl ReplayGainValue {
    /// Peak used when a container tolerates a missing peak tag
    pub const DEFAULT_PEAK: f64 = 0.0;
}

/// Parse the leading number of a ReplayGain tag value.
///
/// The text is split on whitespace and only the first token is parsed, so a
/// unit suffix such as `"-6.48 dB"` is dropped. Non-finite results are
/// rejected.
pub(crate) fn parse_tag_number(key: &str, text: &str) -> Result<f64> {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or_else(|| SoundCheckError::InvalidTagValue {
            key: key.to_string(),
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_unit_suffix() {
        assert_eq!(parse_tag_number("k", "-6.48 dB").unwrap(), -6.48);
        assert_eq!(parse_tag_number("k", "  +2.50 dB ").unwrap(), 2.5);
        assert_eq!(parse_tag_number("k", "0.988403").unwrap(), 0.988403);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_tag_number("k", "").is_err());
        assert!(parse_tag_number("k", "loud").is_err());
        assert!(parse_tag_number("k", "NaN dB").is_err());
        assert!(parse_tag_number("k", "inf").is_err());
        // unit glued to the number is not a separate token
        assert!(parse_tag_number("k", "-6.48dB").is_err());
    }

    #[test]
    fn invalid_value_error_names_the_key() {
        let err = parse_tag_number("TXXX:REPLAYGAIN_TRACK_GAIN", "loud").unwrap_err();
        assert!(err.to_string().contains("TXXX:REPLAYGAIN_TRACK_GAIN"));
        assert!(err.is_replaygain_error());
    }

    #[test]
    fn scope_display() {
        assert_eq!(GainScope::Track.to_string(), "track");
        assert_eq!(GainScope::Album.to_string(), "album");
    }
}
