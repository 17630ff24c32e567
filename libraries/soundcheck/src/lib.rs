//! ReplayGain to iTunes SoundCheck conversion
//!
//! This crate provides:
//! - iTunNORM encoding of a ReplayGain gain value
//! - ID3v2 and MP4 adapters that read ReplayGain tags and write iTunNORM back
//! - lofty-backed tag stores for MPEG and MP4 files
//! - A batch driver with the skip/abort policy of the command line tool
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────────┐
//! │  TagStore   │ ──► │  TagAdapter  │ ──► │ ReplayGainValue │
//! └─────────────┘     │  (ID3 / MP4) │     │   + baseline    │
//!        ▲            └──────────────┘     └─────────────────┘
//!        │                                          │
//!        │            ┌──────────────┐              ▼
//!        └─────────── │  TagAdapter  │ ◄── SoundCheckEncoder
//!          write/save └──────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use soundcheck::{ConvertOptions, Converter};
//! use std::path::Path;
//!
//! let options = ConvertOptions::new().with_album(true);
//! let vector = Converter::new(&options).convert_file(Path::new("/music/song.mp3"))?;
//! println!("iTunNORM:{}", vector.to_tag_text());
//! # Ok::<(), soundcheck::SoundCheckError>(())
//! ```

#![deny(unsafe_code)]

mod adapter;
mod error;
mod file;
mod id3;
mod mp4;
mod options;
mod pipeline;
mod replaygain;
mod soundcheck;
mod store;

pub use adapter::{adapter_for, Extraction, TagAdapter};
pub use error::{Result, SoundCheckError};
pub use file::{open_tag_store, Id3FileStore, Mp4FileStore};
pub use id3::Id3Adapter;
pub use mp4::Mp4Adapter;
pub use options::ConvertOptions;
pub use pipeline::{BatchSummary, Converter};
pub use replaygain::{GainScope, ReplayGainValue};
pub use soundcheck::{SoundCheckEncoder, SoundCheckVector, FIELD_COUNT, MAX_ADJUSTMENT};
pub use store::{comment_key, CommentEncoding, CommentField, MemoryTagStore, TagContainerKind, TagStore};

/// Lookup key of the ID3v2 iTunNORM comment frame
pub const ID3_ITUNNORM_KEY: &str = id3::ITUNNORM_KEY;

/// Lookup key of the MP4 iTunNORM freeform atom
pub const MP4_ITUNNORM_KEY: &str = mp4::ITUNNORM_KEY;
