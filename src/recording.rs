//! The nested "fat" transcript form: a recording is a list of blocks, and a
//! block owns its words plus locale metadata.
//!
//! Wire shapes:
//! - recording: `[ [block, block, ...] ]` — an array holding exactly the block list
//! - block: `[words, isNewLocale, locale]`, or `[]` for a block with no words
//!
//! A block exclusively owns its word list; transforms never share words
//! between blocks.

use std::fmt;

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::word::Word;

/// One contiguous run of words, usually a phrase or sentence group as
/// emitted by the recognizer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub words: Vec<Word>,

    /// Whether this block switched the recognizer to a new locale.
    pub is_new_locale: bool,

    /// Locale tag for this block (e.g. `"en-US"`), when known.
    pub locale: Option<String>,
}

impl Block {
    pub fn new(words: Vec<Word>, is_new_locale: bool, locale: Option<String>) -> Self {
        Self {
            words,
            is_new_locale,
            locale,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// A fragment of this block: same locale metadata, different words.
    pub(crate) fn fragment(&self, words: Vec<Word>) -> Self {
        Self {
            words,
            is_new_locale: self.is_new_locale,
            locale: self.locale.clone(),
        }
    }
}

/// A full transcript: the ordered list of blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recording {
    pub blocks: Vec<Block>,
}

impl Recording {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // A block with no words collapses to the empty array, dropping metadata.
        if self.words.is_empty() {
            return serializer.serialize_seq(Some(0))?.end();
        }
        let mut seq = serializer.serialize_seq(Some(3))?;
        seq.serialize_element(&self.words)?;
        seq.serialize_element(&self.is_new_locale)?;
        seq.serialize_element(&self.locale)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BlockVisitor;

        impl<'de> Visitor<'de> for BlockVisitor {
            type Value = Block;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a block tuple [words, isNewLocale, locale] or []")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Block, A::Error> {
                let words: Vec<Word> = match seq.next_element()? {
                    Some(words) => words,
                    None => return Ok(Block::default()),
                };
                // Either flag may be null or missing; both read as "not set".
                let is_new_locale: bool =
                    seq.next_element::<Option<bool>>()?.flatten().unwrap_or(false);
                let locale: Option<String> = seq.next_element()?.unwrap_or(None);
                while seq.next_element::<IgnoredAny>()?.is_some() {}

                Ok(Block {
                    words,
                    is_new_locale,
                    locale,
                })
            }
        }

        deserializer.deserialize_seq(BlockVisitor)
    }
}

impl Serialize for Recording {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(1))?;
        seq.serialize_element(&self.blocks)?;
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Recording {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordingVisitor;

        impl<'de> Visitor<'de> for RecordingVisitor {
            type Value = Recording;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a recording: a one-element array holding the block list")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Recording, A::Error> {
                let blocks: Vec<Block> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Recording { blocks })
            }
        }

        deserializer.deserialize_seq(RecordingVisitor)
    }
}
