//! File-backed tag stores using lofty
//!
//! - MPEG files: the ID3v2 tag. `TXXX:<desc>` maps to user text frames,
//!   `COMM:<desc>:<lang>` to comment frames.
//! - MP4 files: the `ilst` atom. `----:<mean>:<name>` maps to freeform atoms.

use crate::error::{Result, SoundCheckError};
use crate::store::{CommentEncoding, CommentField, TagContainerKind, TagStore};
use lofty::id3::v2::{CommentFrame, Frame, FrameFlags, FrameValue, Id3v2Tag};
use lofty::mp4::{Atom, AtomData, AtomIdent, Ilst, Mp4File};
use lofty::mpeg::MpegFile;
use lofty::{AudioFile, FileType, ParseOptions, Probe, TagExt, TextEncoding};
use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Open the tag store of an audio file.
///
/// The container kind is decided by probing the file contents: MPEG audio
/// gets an ID3v2 store and MP4 an `ilst` store. Any other format is
/// [`SoundCheckError::UnsupportedContainer`]; files lofty cannot open or
/// parse are [`SoundCheckError::UnopenableFile`].
pub fn open_tag_store<P: AsRef<Path>>(path: P) -> Result<Box<dyn TagStore>> {
    let path = path.as_ref();

    let file_type = Probe::open(path)
        .and_then(|probe| probe.guess_file_type().map_err(Into::into))
        .map_err(|e| unopenable(path, e))?
        .file_type();

    // Only MPEG audio carries the ID3v2 tag we edit. ID3v2 headers on other
    // formats (ADTS AAC, AIFF, WAV) are not looked at.
    match file_type {
        Some(FileType::Mpeg) => Ok(Box::new(Id3FileStore::open(path)?)),
        Some(FileType::Mp4) => Ok(Box::new(Mp4FileStore::open(path)?)),
        _ => Err(SoundCheckError::UnsupportedContainer(
            path.display().to_string(),
        )),
    }
}

fn unopenable(path: &Path, err: impl ToString) -> SoundCheckError {
    SoundCheckError::UnopenableFile {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

fn parse_options() -> ParseOptions {
    ParseOptions::new().read_properties(false)
}

/// ID3v2 tag of an MPEG file
pub struct Id3FileStore {
    path: PathBuf,
    tag: Id3v2Tag,
}

impl Id3FileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| unopenable(path, e))?;
        let mpeg = MpegFile::read_from(&mut file, parse_options()).map_err(|e| unopenable(path, e))?;

        let tag = mpeg.id3v2().cloned().unwrap_or_default();
        debug!("Read ID3v2 tag with {} frames from {:?}", tag.len(), path);

        Ok(Self {
            path: path.to_path_buf(),
            tag,
        })
    }

    fn comment_text(&self, description: &str, language: &str) -> Option<Vec<String>> {
        let texts: Vec<String> = (&self.tag)
            .into_iter()
            .filter(|frame| frame.id_str() == "COMM")
            .filter_map(|frame| match frame.content() {
                FrameValue::Comment(comment)
                    if comment.description == description
                        && comment.language.as_slice() == language.as_bytes() =>
                {
                    Some(comment.content.clone())
                }
                _ => None,
            })
            .collect();

        (!texts.is_empty()).then_some(texts)
    }
}

impl TagStore for Id3FileStore {
    fn kind(&self) -> TagContainerKind {
        TagContainerKind::Id3
    }

    fn text(&self, key: &str) -> Option<Vec<String>> {
        if let Some(description) = key.strip_prefix("TXXX:") {
            return self
                .tag
                .get_user_text(description)
                .map(|text| text.split('\0').map(str::to_string).collect());
        }

        if let Some(rest) = key.strip_prefix("COMM:") {
            let (description, language) = rest.rsplit_once(':')?;
            return self.comment_text(description, language);
        }

        None
    }

    fn set_comment(&mut self, comment: CommentField) -> Result<()> {
        let encoding = match comment.encoding {
            CommentEncoding::Latin1 => TextEncoding::Latin1,
        };

        let frame = Frame::new(
            "COMM",
            FrameValue::Comment(CommentFrame {
                encoding,
                language: comment.language,
                description: comment.description,
                content: comment.text,
            }),
            FrameFlags::default(),
        )?;

        self.tag.insert(frame);
        Ok(())
    }

    fn set_text(&mut self, key: &str, value: String) -> Result<()> {
        let description = key.strip_prefix("TXXX:").ok_or_else(|| {
            SoundCheckError::TagWrite(format!("{} is not an ID3v2 user text key", key))
        })?;

        self.tag.insert_user_text(description.to_string(), value);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.tag
            .save_to_path(&self.path)
            .map_err(|e: lofty::error::LoftyError| SoundCheckError::TagWrite(e.to_string()))?;

        debug!("Wrote ID3v2 tag to {:?}", self.path);
        Ok(())
    }
}

/// `ilst` metadata of an MP4 file
pub struct Mp4FileStore {
    path: PathBuf,
    ilst: Ilst,
}

impl Mp4FileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path).map_err(|e| unopenable(path, e))?;
        let mp4 = Mp4File::read_from(&mut file, parse_options()).map_err(|e| unopenable(path, e))?;

        let ilst = mp4.ilst().cloned().unwrap_or_default();
        debug!("Read ilst with {} atoms from {:?}", ilst.len(), path);

        Ok(Self {
            path: path.to_path_buf(),
            ilst,
        })
    }
}

/// Split `----:<mean>:<name>` into its parts
fn freeform_parts(key: &str) -> Option<(&str, &str)> {
    key.strip_prefix("----:")?.rsplit_once(':')
}

impl TagStore for Mp4FileStore {
    fn kind(&self) -> TagContainerKind {
        TagContainerKind::Mp4
    }

    fn text(&self, key: &str) -> Option<Vec<String>> {
        let (mean, name) = freeform_parts(key)?;
        let ident = AtomIdent::Freeform {
            mean: Cow::Borrowed(mean),
            name: Cow::Borrowed(name),
        };

        let atom = self.ilst.get(&ident)?;
        let texts: Vec<String> = atom
            .data()
            .filter_map(|data| match data {
                AtomData::UTF8(text) | AtomData::UTF16(text) => Some(text.clone()),
                _ => None,
            })
            .collect();

        (!texts.is_empty()).then_some(texts)
    }

    fn set_comment(&mut self, comment: CommentField) -> Result<()> {
        Err(SoundCheckError::TagWrite(format!(
            "MP4 metadata has no comment frames ({})",
            comment.key()
        )))
    }

    fn set_text(&mut self, key: &str, value: String) -> Result<()> {
        let (mean, name) = freeform_parts(key).ok_or_else(|| {
            SoundCheckError::TagWrite(format!("{} is not an MP4 freeform key", key))
        })?;

        let ident = AtomIdent::Freeform {
            mean: Cow::Owned(mean.to_string()),
            name: Cow::Owned(name.to_string()),
        };
        self.ilst.insert(Atom::new(ident, AtomData::UTF8(value)));
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.ilst
            .save_to_path(&self.path)
            .map_err(|e: lofty::error::LoftyError| SoundCheckError::TagWrite(e.to_string()))?;

        debug!("Wrote ilst to {:?}", self.path);
        Ok(())
    }
}
