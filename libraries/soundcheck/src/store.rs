//! Tag store capability
//!
//! Adapters never touch a tag format directly. They look fields up by key
//! through [`TagStore`], using the usual `FRAME:description` spelling:
//!
//! - ID3v2 user text: `TXXX:REPLAYGAIN_TRACK_GAIN`
//! - ID3v2 comment: `COMM:iTunNORM:eng`
//! - MP4 freeform atom: `----:com.apple.iTunes:iTunNORM`
//!
//! Keys are matched exactly (case-sensitive).

use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;

/// The kind of tag container a store wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagContainerKind {
    Id3,
    Mp4,
}

impl fmt::Display for TagContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id3 => f.write_str("ID3"),
            Self::Mp4 => f.write_str("MP4"),
        }
    }
}

/// Text encoding marker of an ID3v2 comment frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentEncoding {
    /// ISO-8859-1, encoding byte 0
    #[default]
    Latin1,
}

/// An ID3v2 comment-style field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentField {
    pub encoding: CommentEncoding,
    /// ISO-639-2 language code
    pub language: [u8; 3],
    pub description: String,
    pub text: String,
}

impl CommentField {
    /// Key under which this comment is looked up
    pub fn key(&self) -> String {
        comment_key(&self.description, &self.language)
    }
}

/// `COMM:<description>:<language>`
pub fn comment_key(description: &str, language: &[u8; 3]) -> String {
    format!("COMM:{}:{}", description, String::from_utf8_lossy(language))
}

/// Generic access to one file's tags
pub trait TagStore {
    /// Container kind, fixed when the store is opened
    fn kind(&self) -> TagContainerKind;

    /// All text values stored under `key`, or `None` if the key is absent
    fn text(&self, key: &str) -> Option<Vec<String>>;

    /// Whether `key` is present
    fn contains(&self, key: &str) -> bool {
        self.text(key).is_some()
    }

    /// Add a comment field, replacing one with the same description and language
    fn set_comment(&mut self, comment: CommentField) -> Result<()>;

    /// Set `key` to a single text value, replacing any previous values
    fn set_text(&mut self, key: &str, value: String) -> Result<()>;

    /// Persist changes to the underlying file
    fn save(&mut self) -> Result<()>;
}

/// In-memory tag store
///
/// Comments set through [`TagStore::set_comment`] are readable under their
/// `COMM:<description>:<language>` key. Saving only counts the calls.
#[derive(Debug, Clone)]
pub struct MemoryTagStore {
    kind: TagContainerKind,
    fields: BTreeMap<String, Vec<String>>,
    comments: BTreeMap<String, CommentField>,
    saves: usize,
}

impl MemoryTagStore {
    pub fn new(kind: TagContainerKind) -> Self {
        Self {
            kind,
            fields: BTreeMap::new(),
            comments: BTreeMap::new(),
            saves: 0,
        }
    }

    /// Builder-style insert of a single text value
    pub fn with_text(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), vec![value.to_string()]);
        self
    }

    /// Comment stored under `key`, with its encoding and language
    pub fn comment(&self, key: &str) -> Option<&CommentField> {
        self.comments.get(key)
    }

    /// Number of times [`TagStore::save`] was called
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl TagStore for MemoryTagStore {
    fn kind(&self) -> TagContainerKind {
        self.kind
    }

    fn text(&self, key: &str) -> Option<Vec<String>> {
        if let Some(comment) = self.comments.get(key) {
            return Some(vec![comment.text.clone()]);
        }
        self.fields.get(key).cloned()
    }

    fn set_comment(&mut self, comment: CommentField) -> Result<()> {
        let key = comment.key();
        self.fields.remove(&key);
        self.comments.insert(key, comment);
        Ok(())
    }

    fn set_text(&mut self, key: &str, value: String) -> Result<()> {
        self.comments.remove(key);
        self.fields.insert(key.to_string(), vec![value]);
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_sensitive() {
        let store = MemoryTagStore::new(TagContainerKind::Id3)
            .with_text("TXXX:replaygain_track_gain", "-3.00 dB");
        assert!(store.contains("TXXX:replaygain_track_gain"));
        assert!(!store.contains("TXXX:REPLAYGAIN_TRACK_GAIN"));
    }

    #[test]
    fn comment_replaces_previous_comment() {
        let mut store = MemoryTagStore::new(TagContainerKind::Id3);
        for text in ["first", "second"] {
            store
                .set_comment(CommentField {
                    encoding: CommentEncoding::Latin1,
                    language: *b"eng",
                    description: "iTunNORM".to_string(),
                    text: text.to_string(),
                })
                .unwrap();
        }
        assert_eq!(
            store.text("COMM:iTunNORM:eng"),
            Some(vec!["second".to_string()])
        );
    }

    #[test]
    fn set_text_replaces_all_values() {
        let mut store = MemoryTagStore::new(TagContainerKind::Mp4)
            .with_text("----:com.apple.iTunes:iTunNORM", "old");
        store
            .set_text("----:com.apple.iTunes:iTunNORM", "new".to_string())
            .unwrap();
        assert_eq!(
            store.text("----:com.apple.iTunes:iTunNORM"),
            Some(vec!["new".to_string()])
        );
    }

    #[test]
    fn comment_key_format() {
        assert_eq!(comment_key("iTunNORM", b"eng"), "COMM:iTunNORM:eng");
    }
}
