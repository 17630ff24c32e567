//! Tag adapters: ReplayGain in, SoundCheck out
//!
//! Each container kind has its own key scheme and its own tolerance for
//! missing values, so extraction and write-back live behind [`TagAdapter`]
//! with one implementation per [`TagContainerKind`].

use crate::error::{Result, SoundCheckError};
use crate::id3::Id3Adapter;
use crate::mp4::Mp4Adapter;
use crate::replaygain::parse_tag_number;
use crate::{ConvertOptions, GainScope, ReplayGainValue, SoundCheckVector, TagContainerKind, TagStore};
use tracing::{debug, info, warn};

/// Values read from a file before encoding
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub gain: ReplayGainValue,
    /// Stored iTunNORM value, or a fresh default
    pub baseline: SoundCheckVector,
}

/// Bridge between a tag store and the ReplayGain/SoundCheck model
pub trait TagAdapter {
    /// Container kind this adapter understands
    fn kind(&self) -> TagContainerKind;

    /// Read ReplayGain values and the baseline iTunNORM vector
    fn extract(&self, tags: &dyn TagStore, options: &ConvertOptions) -> Result<Extraction>;

    /// Store `vector` in the container's native iTunNORM field
    fn write(&self, tags: &mut dyn TagStore, vector: &SoundCheckVector) -> Result<()>;
}

/// Adapter for a container kind
pub fn adapter_for(kind: TagContainerKind) -> &'static dyn TagAdapter {
    match kind {
        TagContainerKind::Id3 => &Id3Adapter,
        TagContainerKind::Mp4 => &Mp4Adapter,
    }
}

/// Candidate keys for one ReplayGain scope, in priority order
#[derive(Debug)]
pub(crate) struct ScopeKeys {
    pub gain: &'static [&'static str],
    pub peak: &'static [&'static str],
}

/// First candidate present in `tags`
pub(crate) fn first_present(tags: &dyn TagStore, candidates: &[&'static str]) -> Option<&'static str> {
    candidates.iter().copied().find(|key| tags.contains(key))
}

/// Pick album keys when requested and available, track keys otherwise
pub(crate) fn resolve_scope<'k>(
    tags: &dyn TagStore,
    options: &ConvertOptions,
    track: &'k ScopeKeys,
    album: &'k ScopeKeys,
) -> (GainScope, &'k ScopeKeys) {
    if !options.album {
        return (GainScope::Track, track);
    }

    if first_present(tags, album.gain).is_some() {
        (GainScope::Album, album)
    } else {
        warn!("Album ReplayGain requested, but no tag was found; continuing with track ReplayGain");
        (GainScope::Track, track)
    }
}

/// Parse the first value stored under `key`
pub(crate) fn read_number(tags: &dyn TagStore, key: &str, options: &ConvertOptions) -> Result<f64> {
    let text = tags
        .text(key)
        .and_then(|values| values.into_iter().next())
        .unwrap_or_default();

    if options.verbose {
        info!("{}: {}", key, text);
    } else {
        debug!(key, value = %text, "Found ReplayGain tag");
    }

    parse_tag_number(key, &text)
}

/// Stored iTunNORM vector under `key`, or a fresh default
pub(crate) fn read_baseline(tags: &dyn TagStore, key: &str, options: &ConvertOptions) -> SoundCheckVector {
    let Some(text) = tags.text(key).and_then(|values| values.into_iter().next()) else {
        return SoundCheckVector::default();
    };

    if options.verbose {
        info!("Starting iTunNORM:{}", text);
    }

    SoundCheckVector::parse(&text).unwrap_or_else(|| {
        warn!("Ignoring malformed iTunNORM value {:?}", text);
        SoundCheckVector::default()
    })
}

/// Missing gain is fatal for every container
pub(crate) fn require_gain(tags: &dyn TagStore, keys: &ScopeKeys, scope: GainScope) -> Result<&'static str> {
    first_present(tags, keys.gain).ok_or(SoundCheckError::MissingGainTag { scope })
}
