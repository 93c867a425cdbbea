//! The level-tagged flat stream and its tree codec.
//!
//! `flatten` walks the nested recording and emits a pre-order stream of
//! headers and words; `fatten` reverses it with an explicit stack of open
//! headers, one partial collection per level. A header of level `n` stays
//! open until the next header of level `<= n` arrives, at which point it
//! (and anything nested deeper) materializes into its parent collection.
//!
//! The flat stream is transient: built, passed through zero or more
//! transforms, and discarded on reconstruction. It is never persisted.

use crate::error::{Error, Result};
use crate::recording::{Block, Recording};
use crate::word::Word;

/// Version tag stamped on the top header; discarded on reconstruction.
pub const FORMAT_VERSION: &str = "1.0";

/// Payload of a structural header.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderData {
    Top { version: String },
    BlockArray,
    Block {
        is_new_locale: bool,
        locale: Option<String>,
    },
}

/// A structural marker in the flat stream.
///
/// The level is carried as data rather than implied by the payload so the
/// codec can reject a stream with an unknown nesting level instead of
/// misfiling its contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub level: u8,
    pub data: HeaderData,
}

impl Header {
    pub fn top() -> Self {
        Self {
            level: 0,
            data: HeaderData::Top {
                version: FORMAT_VERSION.to_owned(),
            },
        }
    }

    pub fn block_array() -> Self {
        Self {
            level: 1,
            data: HeaderData::BlockArray,
        }
    }

    pub fn block(is_new_locale: bool, locale: Option<String>) -> Self {
        Self {
            level: 2,
            data: HeaderData::Block {
                is_new_locale,
                locale,
            },
        }
    }
}

/// One element of the flat stream: a structural header or a word record.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Header(Header),
    Word(Word),
}

/// Serialize a recording into its flat pre-order stream.
///
/// A block with zero words still emits its header, just no word items.
pub fn flatten(recording: &Recording) -> Vec<Item> {
    let word_count: usize = recording.blocks.iter().map(|b| b.words.len()).sum();
    let mut stream = Vec::with_capacity(2 + recording.blocks.len() + word_count);

    stream.push(Item::Header(Header::top()));
    stream.push(Item::Header(Header::block_array()));
    for block in &recording.blocks {
        stream.push(Item::Header(Header::block(
            block.is_new_locale,
            block.locale.clone(),
        )));
        for word in &block.words {
            stream.push(Item::Word(word.clone()));
        }
    }
    stream
}

/// An open header plus the collection accumulating under it.
enum Frame {
    Top { block_arrays: Vec<Vec<Block>> },
    BlockArray { blocks: Vec<Block> },
    Block {
        is_new_locale: bool,
        locale: Option<String>,
        words: Vec<Word>,
    },
}

impl Frame {
    fn open(header: Header) -> Result<Self> {
        match (header.level, header.data) {
            (0, HeaderData::Top { .. }) => Ok(Frame::Top {
                block_arrays: Vec::new(),
            }),
            (1, HeaderData::BlockArray) => Ok(Frame::BlockArray { blocks: Vec::new() }),
            (
                2,
                HeaderData::Block {
                    is_new_locale,
                    locale,
                },
            ) => Ok(Frame::Block {
                is_new_locale,
                locale,
                words: Vec::new(),
            }),
            (level, _) => Err(Error::msg(format!(
                "header level {level} does not match its payload"
            ))),
        }
    }
}

/// Reconstruct the nested recording from a flat stream.
///
/// Fails with [`Error::InvalidHeaderLevel`] when a header's level is not one
/// of 0, 1, 2. The version carried by the top header is discarded.
///
/// Edge case: a block header followed by no words materializes to the empty
/// block (its locale metadata is dropped), matching the wire form `[]`.
pub fn fatten<I>(items: I) -> Result<Recording>
where
    I: IntoIterator<Item = Item>,
{
    let mut stack: Vec<Frame> = Vec::new();

    for item in items {
        match item {
            Item::Header(header) => {
                if header.level > 2 {
                    return Err(Error::InvalidHeaderLevel(header.level));
                }
                let level = usize::from(header.level);

                // Close everything nested at or below the incoming level.
                while stack.len() > level {
                    if close_frame(&mut stack)?.is_some() {
                        return Err(Error::msg("unexpected second top-level header"));
                    }
                }
                if stack.len() < level {
                    return Err(Error::msg(format!(
                        "header level {} skips an enclosing level",
                        header.level
                    )));
                }
                stack.push(Frame::open(header)?);
            }
            Item::Word(word) => match stack.last_mut() {
                Some(Frame::Block { words, .. }) => words.push(word),
                _ => return Err(Error::msg("word encountered outside of an open block")),
            },
        }
    }

    // End of stream: close all remaining open headers down to the top.
    let mut finished = None;
    while !stack.is_empty() {
        finished = close_frame(&mut stack)?;
    }
    finished.ok_or_else(|| Error::msg("flat stream contained no top-level header"))
}

/// Pop the deepest open frame, materializing it into its parent collection.
///
/// Returns the finished recording when the popped frame was the top.
fn close_frame(stack: &mut Vec<Frame>) -> Result<Option<Recording>> {
    let frame = match stack.pop() {
        Some(frame) => frame,
        None => return Ok(None),
    };

    match frame {
        Frame::Block {
            is_new_locale,
            locale,
            words,
        } => {
            let block = if words.is_empty() {
                Block::default()
            } else {
                Block::new(words, is_new_locale, locale)
            };
            match stack.last_mut() {
                Some(Frame::BlockArray { blocks }) => blocks.push(block),
                _ => return Err(Error::msg("block closed outside of a block array")),
            }
            Ok(None)
        }
        Frame::BlockArray { blocks } => {
            match stack.last_mut() {
                Some(Frame::Top { block_arrays }) => block_arrays.push(blocks),
                _ => return Err(Error::msg("block array closed outside of the top header")),
            }
            Ok(None)
        }
        Frame::Top { block_arrays } => {
            let blocks = block_arrays.into_iter().next().unwrap_or_default();
            Ok(Some(Recording::new(blocks)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::Word;

    fn sample_recording() -> Recording {
        Recording::new(vec![
            Block::new(
                vec![
                    Word::from_display("Hello", 480, 850),
                    Word::from_display("world.", 870, 1190),
                ],
                true,
                Some("en-US".into()),
            ),
            Block::new(
                vec![Word::from_display("Bonjour", 1500, 1900)],
                true,
                Some("fr-FR".into()),
            ),
        ])
    }

    #[test]
    fn flatten_emits_headers_then_words_in_order() {
        let stream = flatten(&sample_recording());
        assert_eq!(stream.len(), 2 + 2 + 3);
        assert!(matches!(
            &stream[0],
            Item::Header(Header { level: 0, data: HeaderData::Top { .. } })
        ));
        assert!(matches!(
            &stream[1],
            Item::Header(Header { level: 1, data: HeaderData::BlockArray })
        ));
        assert!(matches!(&stream[2], Item::Header(Header { level: 2, .. })));
        assert!(matches!(&stream[3], Item::Word(_)));
    }

    #[test]
    fn round_trips_a_recording() -> anyhow::Result<()> {
        let recording = sample_recording();
        let again = fatten(flatten(&recording))?;
        assert_eq!(recording, again);
        Ok(())
    }

    #[test]
    fn round_trips_a_zero_word_block() -> anyhow::Result<()> {
        let recording = Recording::new(vec![
            Block::default(),
            Block::new(vec![Word::from_display("hi", 0, 10)], false, None),
        ]);
        let again = fatten(flatten(&recording))?;
        assert_eq!(recording, again);
        Ok(())
    }

    #[test]
    fn zero_word_block_materializes_without_metadata() -> anyhow::Result<()> {
        // A header-only block loses its locale tag: the fat form for "no words"
        // is the bare empty block.
        let stream = vec![
            Item::Header(Header::top()),
            Item::Header(Header::block_array()),
            Item::Header(Header::block(true, Some("en-US".into()))),
        ];
        let recording = fatten(stream)?;
        assert_eq!(recording.blocks, vec![Block::default()]);
        Ok(())
    }

    #[test]
    fn rejects_unknown_header_levels() {
        let stream = vec![
            Item::Header(Header::top()),
            Item::Header(Header {
                level: 7,
                data: HeaderData::BlockArray,
            }),
        ];
        match fatten(stream) {
            Err(Error::InvalidHeaderLevel(7)) => {}
            other => panic!("expected InvalidHeaderLevel, got {other:?}"),
        }
    }

    #[test]
    fn rejects_words_outside_a_block() {
        let stream = vec![
            Item::Header(Header::top()),
            Item::Word(Word::from_display("stray", 0, 10)),
        ];
        assert!(fatten(stream).is_err());
    }

    #[test]
    fn rejects_an_empty_stream() {
        assert!(fatten(Vec::new()).is_err());
    }
}
