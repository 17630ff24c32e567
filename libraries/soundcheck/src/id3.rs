//! ID3v2 adapter
//!
//! ReplayGain lives in `TXXX` user text frames, spelled either upper- or
//! lowercase depending on the tagger. SoundCheck lives in a `COMM` frame
//! with description `iTunNORM` and language `eng`.

use crate::adapter::{
    first_present, read_baseline, read_number, require_gain, resolve_scope, Extraction, ScopeKeys,
    TagAdapter,
};
use crate::error::{Result, SoundCheckError};
use crate::store::{CommentEncoding, CommentField};
use crate::{ConvertOptions, ReplayGainValue, SoundCheckVector, TagContainerKind, TagStore};
use tracing::info;

/// Description of the SoundCheck comment frame
pub const ITUNNORM_DESCRIPTION: &str = "iTunNORM";

/// Language of the SoundCheck comment frame
pub const ITUNNORM_LANGUAGE: [u8; 3] = *b"eng";

/// Lookup key of the SoundCheck comment frame
pub const ITUNNORM_KEY: &str = "COMM:iTunNORM:eng";

const TRACK_KEYS: ScopeKeys = ScopeKeys {
    gain: &["TXXX:REPLAYGAIN_TRACK_GAIN", "TXXX:replaygain_track_gain"],
    peak: &["TXXX:REPLAYGAIN_TRACK_PEAK", "TXXX:replaygain_track_peak"],
};

const ALBUM_KEYS: ScopeKeys = ScopeKeys {
    gain: &["TXXX:REPLAYGAIN_ALBUM_GAIN", "TXXX:replaygain_album_gain"],
    peak: &["TXXX:REPLAYGAIN_ALBUM_PEAK", "TXXX:replaygain_album_peak"],
};

/// Adapter for ID3v2 tags. Both gain and peak are required.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id3Adapter;

impl TagAdapter for Id3Adapter {
    fn kind(&self) -> TagContainerKind {
        TagContainerKind::Id3
    }

    fn extract(&self, tags: &dyn TagStore, options: &ConvertOptions) -> Result<Extraction> {
        if options.verbose {
            info!("Processing ID3 tags.");
        }

        let (scope, keys) = resolve_scope(tags, options, &TRACK_KEYS, &ALBUM_KEYS);

        let gain_key = require_gain(tags, keys, scope)?;
        let gain_db = read_number(tags, gain_key, options)?;

        let peak_key =
            first_present(tags, keys.peak).ok_or(SoundCheckError::MissingPeakTag { scope })?;
        let peak = read_number(tags, peak_key, options)?;

        Ok(Extraction {
            gain: ReplayGainValue {
                gain_db,
                peak,
                scope,
            },
            baseline: read_baseline(tags, ITUNNORM_KEY, options),
        })
    }

    fn write(&self, tags: &mut dyn TagStore, vector: &SoundCheckVector) -> Result<()> {
        tags.set_comment(CommentField {
            encoding: CommentEncoding::Latin1,
            language: ITUNNORM_LANGUAGE,
            description: ITUNNORM_DESCRIPTION.to_string(),
            text: vector.to_tag_text(),
        })
    }
}
