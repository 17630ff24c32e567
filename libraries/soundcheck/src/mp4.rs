//! MP4 adapter
//!
//! Both ReplayGain and SoundCheck are iTunes freeform atoms
//! (`----:com.apple.iTunes:<name>`). Only the lowercase ReplayGain names are
//! recognised, and a missing peak is tolerated.

use crate::adapter::{
    first_present, read_baseline, read_number, require_gain, resolve_scope, Extraction, ScopeKeys,
    TagAdapter,
};
use crate::error::Result;
use crate::{ConvertOptions, ReplayGainValue, SoundCheckVector, TagContainerKind, TagStore};
use tracing::info;

/// Freeform atom holding the SoundCheck vector
pub const ITUNNORM_KEY: &str = "----:com.apple.iTunes:iTunNORM";

const TRACK_KEYS: ScopeKeys = ScopeKeys {
    gain: &["----:com.apple.iTunes:replaygain_track_gain"],
    peak: &["----:com.apple.iTunes:replaygain_track_peak"],
};

const ALBUM_KEYS: ScopeKeys = ScopeKeys {
    gain: &["----:com.apple.iTunes:replaygain_album_gain"],
    peak: &["----:com.apple.iTunes:replaygain_album_peak"],
};

/// Adapter for MP4 `ilst` metadata
#[derive(Debug, Clone, Copy, Default)]
pub struct Mp4Adapter;

impl TagAdapter for Mp4Adapter {
    fn kind(&self) -> TagContainerKind {
        TagContainerKind::Mp4
    }

    fn extract(&self, tags: &dyn TagStore, options: &ConvertOptions) -> Result<Extraction> {
        if options.verbose {
            info!("Processing MP4 metadata.");
        }

        let (scope, keys) = resolve_scope(tags, options, &TRACK_KEYS, &ALBUM_KEYS);

        let gain_key = require_gain(tags, keys, scope)?;
        let gain_db = read_number(tags, gain_key, options)?;

        let peak = match first_present(tags, keys.peak) {
            Some(peak_key) => read_number(tags, peak_key, options)?,
            None => ReplayGainValue::DEFAULT_PEAK,
        };

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
        tags.set_text(ITUNNORM_KEY, vector.to_tag_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GainScope, MemoryTagStore, SoundCheckError};

    fn store() -> MemoryTagStore {
        MemoryTagStore::new(TagContainerKind::Mp4)
    }

    #[test]
    fn extracts_track_gain_and_peak() {
        let tags = store()
            .with_text("----:com.apple.iTunes:replaygain_track_gain", "-4.20 dB")
            .with_text("----:com.apple.iTunes:replaygain_track_peak", "0.812345");

        let extraction = Mp4Adapter.extract(&tags, &ConvertOptions::new()).unwrap();
        assert_eq!(extraction.gain.gain_db, -4.2);
        assert_eq!(extraction.gain.peak, 0.812345);
        assert_eq!(extraction.gain.scope, GainScope::Track);
    }

    #[test]
    fn missing_peak_is_tolerated() {
        let tags = store().with_text("----:com.apple.iTunes:replaygain_track_gain", "-4.20 dB");

        let extraction = Mp4Adapter.extract(&tags, &ConvertOptions::new()).unwrap();
        assert_eq!(extraction.gain.peak, ReplayGainValue::DEFAULT_PEAK);
    }

    #[test]
    fn album_scope_when_requested() {
        let tags = store()
            .with_text("----:com.apple.iTunes:replaygain_track_gain", "-4.20 dB")
            .with_text("----:com.apple.iTunes:replaygain_album_gain", "-2.10 dB");

        let options = ConvertOptions::new().with_album(true);
        let extraction = Mp4Adapter.extract(&tags, &options).unwrap();
        assert_eq!(extraction.gain.scope, GainScope::Album);
        assert_eq!(extraction.gain.gain_db, -2.1);
    }

    #[test]
    fn uppercase_names_are_not_recognised() {
        let tags = store().with_text("----:com.apple.iTunes:REPLAYGAIN_TRACK_GAIN", "-4.20 dB");
        let err = Mp4Adapter.extract(&tags, &ConvertOptions::new()).unwrap_err();
        assert!(matches!(err, SoundCheckError::MissingGainTag { .. }));
    }

    #[test]
    fn existing_itunnorm_is_the_baseline() {
        let stored =
            " 00000010 00000010 00000020 00000020 00001234 00001234 00005678 00005678 00000042 00000042";
        let tags = store()
            .with_text("----:com.apple.iTunes:replaygain_track_gain", "0 dB")
            .with_text(ITUNNORM_KEY, stored);

        let extraction = Mp4Adapter.extract(&tags, &ConvertOptions::new()).unwrap();
        assert_eq!(extraction.baseline.to_tag_text(), stored);
    }

    #[test]
    fn write_sets_freeform_atom() {
        let mut tags = store();
        let vector = SoundCheckVector::from_fields([1000, 1000, 2500, 2500, 0, 0, 0, 0, 0, 0]);
        Mp4Adapter.write(&mut tags, &vector).unwrap();

        assert_eq!(
            tags.text(ITUNNORM_KEY),
            Some(vec![
                " 000003E8 000003E8 000009C4 000009C4 00000000 00000000 00000000 00000000 00000000 00000000"
                    .to_string()
            ])
        );
    }
}
