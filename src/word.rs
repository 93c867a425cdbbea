//! The atomic timed-text unit produced by speech recognition.
//!
//! A word carries two text forms:
//! - `text`: the canonical form (lowercased, trimmed of leading/trailing
//!   non-word characters) used for matching and character counting
//! - `decorated`: the original display form (case and punctuation), stored
//!   only when it differs from the canonical form
//!
//! Timing is integer milliseconds. The wire format is a 7-element tuple and
//! carries times as numeric strings; see the serde implementations at the
//! bottom of this module.

use std::fmt;

use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A single recognized word with timing and opaque recognizer payload.
///
/// The `reserved_a`, `reserved_b` and `speaker` fields are never interpreted
/// here; they are carried verbatim so transforms cannot couple to their
/// current shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Word {
    /// Canonical text: lowercased, trimmed of leading/trailing non-word characters.
    pub text: String,

    /// Display form, present only when it differs from `text`.
    pub decorated: Option<String>,

    /// Inclusive start time in milliseconds.
    pub start_ms: i64,

    /// Inclusive end time in milliseconds.
    pub end_ms: i64,

    /// Opaque recognizer payload, passed through untouched.
    pub reserved_a: Value,

    /// Opaque recognizer payload, passed through untouched.
    pub reserved_b: Value,

    /// Speaker/confidence pair, passed through untouched.
    pub speaker: Value,
}

impl Word {
    /// Build a word from a display string, deriving the canonical form.
    pub fn from_display(display: impl Into<String>, start_ms: i64, end_ms: i64) -> Self {
        let display = display.into();
        let text = canonicalize(&display);
        let decorated = if display == text { None } else { Some(display) };
        Self {
            text,
            decorated,
            start_ms,
            end_ms,
            ..Self::default()
        }
    }

    /// The display form: decorated when present, canonical otherwise.
    pub fn display(&self) -> &str {
        self.decorated.as_deref().unwrap_or(&self.text)
    }

    /// Produce a new word around a rewritten display string, re-deriving the
    /// canonical form and carrying timing and the opaque payload fields.
    pub fn rewrite(&self, display: &str) -> Self {
        self.rebuild(display, self.start_ms, self.end_ms)
    }

    /// Produce a new word with rewritten display text *and* timing.
    pub fn rebuild(&self, display: &str, start_ms: i64, end_ms: i64) -> Self {
        let text = canonicalize(display);
        let decorated = if display == text {
            None
        } else {
            Some(display.to_owned())
        };
        Self {
            text,
            decorated,
            start_ms,
            end_ms,
            reserved_a: self.reserved_a.clone(),
            reserved_b: self.reserved_b.clone(),
            speaker: self.speaker.clone(),
        }
    }

    /// Produce a new word with shifted timing and everything else untouched.
    pub fn with_times(&self, start_ms: i64, end_ms: i64) -> Self {
        Self {
            start_ms,
            end_ms,
            ..self.clone()
        }
    }
}

/// Lowercase and strip leading/trailing non-word characters.
pub(crate) fn canonicalize(display: &str) -> String {
    display
        .trim_matches(|c: char| !(c.is_alphanumeric() || c == '_'))
        .to_lowercase()
}

impl Serialize for Word {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(7))?;
        seq.serialize_element(&self.text)?;
        seq.serialize_element(&self.decorated)?;
        // Times go back out the way they came in: as numeric strings.
        seq.serialize_element(&self.start_ms.to_string())?;
        seq.serialize_element(&self.end_ms.to_string())?;
        seq.serialize_element(&self.reserved_a)?;
        seq.serialize_element(&self.reserved_b)?;
        seq.serialize_element(&self.speaker)?;
        seq.end()
    }
}

/// A wire timestamp: a numeric string, or a bare number from older producers.
struct MsField(i64);

impl<'de> Deserialize<'de> for MsField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MsVisitor;

        impl<'de> Visitor<'de> for MsVisitor {
            type Value = MsField;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a millisecond timestamp as a numeric string or number")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MsField, E> {
                v.trim().parse::<i64>().map(MsField).map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<MsField, E> {
                Ok(MsField(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<MsField, E> {
                i64::try_from(v).map(MsField).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MsVisitor)
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WordVisitor;

        impl<'de> Visitor<'de> for WordVisitor {
            type Value = Word;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a word tuple [text, decorated, start, end, ...]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Word, A::Error> {
                let text: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let decorated: Option<String> = seq.next_element()?.unwrap_or(None);
                let start_ms = seq
                    .next_element::<MsField>()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?
                    .0;
                let end_ms = seq
                    .next_element::<MsField>()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?
                    .0;
                // Optional trailing payload; a short tuple means "absent", not an error.
                let reserved_a: Value = seq.next_element()?.unwrap_or(Value::Null);
                let reserved_b: Value = seq.next_element()?.unwrap_or(Value::Null);
                let speaker: Value = seq.next_element()?.unwrap_or(Value::Null);
                while seq.next_element::<IgnoredAny>()?.is_some() {}

                Ok(Word {
                    text,
                    decorated,
                    start_ms,
                    end_ms,
                    reserved_a,
                    reserved_b,
                    speaker,
                })
            }
        }

        deserializer.deserialize_seq(WordVisitor)
    }
}
