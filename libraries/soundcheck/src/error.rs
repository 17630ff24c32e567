//! Error types for SoundCheck conversion

use crate::GainScope;
use thiserror::Error;

/// Result type for SoundCheck operations
pub type Result<T> = std::result::Result<T, SoundCheckError>;

/// Errors that can occur while converting a file
#[derive(Error, Debug)]
pub enum SoundCheckError {
    /// No ReplayGain gain value for the resolved scope
    #[error("No ReplayGain {scope} gain tag found")]
    MissingGainTag { scope: GainScope },

    /// No ReplayGain peak value for the resolved scope
    #[error("No ReplayGain {scope} peak tag found")]
    MissingPeakTag { scope: GainScope },

    /// A gain or peak tag whose text is not a finite number
    #[error("Invalid value for {key}: {value:?}")]
    InvalidTagValue { key: String, value: String },

    /// The file is neither MPEG/ID3v2 nor MP4
    #[error("'{0}' is neither mp3 nor mp4")]
    UnsupportedContainer(String),

    /// The tag layer could not open or parse the file
    #[error("Failed to open '{path}': {reason}")]
    UnopenableFile { path: String, reason: String },

    /// Inserting a field or persisting the tag failed
    #[error("Failed to write tags: {0}")]
    TagWrite(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SoundCheckError {
    /// Whether this is a ReplayGain extraction error.
    ///
    /// These abort a whole batch; every other kind only skips the file.
    pub fn is_replaygain_error(&self) -> bool {
        matches!(
            self,
            Self::MissingGainTag { .. } | Self::MissingPeakTag { .. } | Self::InvalidTagValue { .. }
        )
    }
}

impl From<lofty::error::LoftyError> for SoundCheckError {
    fn from(err: lofty::error::LoftyError) -> Self {
        Self::TagWrite(err.to_string())
    }
}
