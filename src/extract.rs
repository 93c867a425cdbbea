//! High-level API for turning a recording into rendered output.
//!
//! We expose a single, ergonomic entry point (`Extractor`) that wires up the
//! lower-level codec, transform, segmentation and encoder modules:
//!
//! flatten → hyphen split → hyphen join → search/replace → timeshift →
//! fatten → quantize → soft break → hard break → encoder
//!
//! Each stage only runs when its option is set. The intent is:
//! - We validate and compile options once (regex compilation is not free).
//! - We reuse the extractor to process multiple recordings.
//! - Callers choose output format and behavior via `Opts`.

use std::io::{BufWriter, Write};

use tracing::debug;

use crate::block_encoder::BlockEncoder;
use crate::breaks::{hard_break_blocks, soft_break_blocks};
use crate::error::Result;
use crate::flat::{Item, fatten, flatten};
use crate::hyphen::{join_hyphens, split_hyphens};
use crate::opts::Opts;
use crate::output_type::OutputType;
use crate::quantize::quantize_blocks;
use crate::recording::{Block, Recording};
use crate::replace::{Replacements, replace_words};
use crate::srt_encoder::SrtEncoder;
use crate::text_encoder::TextEncoder;
use crate::timeshift::timeshift;
use crate::transcript_encoder::TranscriptEncoder;
use crate::vtt_encoder::VttEncoder;

/// The main high-level extraction entry point.
///
/// Typical usage:
/// - Construct once (option validation and replacement compilation happen here).
/// - Call `extract` many times with different recordings and outputs.
pub struct Extractor {
    opts: Opts,
    replacements: Option<Replacements>,
}

impl Extractor {
    /// Build an extractor from validated options.
    ///
    /// We fail fast on invalid numeric knobs and on replacement pairs that
    /// do not compile, so once `new` succeeds every `extract` call can focus
    /// on the data.
    pub fn new(opts: Opts) -> Result<Self> {
        opts.validate()?;
        let replacements = if opts.replacements.is_empty() {
            None
        } else {
            Some(Replacements::compile(&opts.replacements)?)
        };
        Ok(Self { opts, replacements })
    }

    /// Run the configured pipeline over one recording and render the result.
    pub fn extract<W: Write>(&self, recording: &Recording, w: W) -> Result<()> {
        let blocks = self.transform(recording)?;

        // Buffer output for efficiency (especially important for stdout).
        let writer = BufWriter::new(w);

        // Select an encoder based on the requested output type.
        // We keep this explicit (no trait objects) to avoid lifetime surprises.
        match self.opts.output_type {
            OutputType::Text => write_blocks(&blocks, &mut TextEncoder::new(writer)),
            OutputType::Transcript => write_blocks(&blocks, &mut TranscriptEncoder::new(writer)),
            OutputType::Srt => write_blocks(&blocks, &mut SrtEncoder::new(writer)),
            OutputType::Vtt => write_blocks(&blocks, &mut VttEncoder::new(writer)),
        }
    }

    /// Apply the stream transforms and block segmentation, returning blocks
    /// ready for rendering.
    ///
    /// The word transforms chain lazily over the flat stream; the stream is
    /// realized once, reconstructed, and then segmented in block form.
    pub fn transform(&self, recording: &Recording) -> Result<Vec<Block>> {
        let mut stream: Box<dyn Iterator<Item = Item>> =
            Box::new(flatten(recording).into_iter());

        if self.opts.split_hyphens {
            stream = Box::new(split_hyphens(stream));
        }
        if self.opts.join_hyphens {
            stream = Box::new(join_hyphens(stream));
        }
        if let Some(replacements) = &self.replacements {
            stream = Box::new(replace_words(stream, replacements.clone()));
        }

        let items: Vec<Item> = match self.opts.timeshift_ms {
            Some(offset_ms) => timeshift(stream, offset_ms),
            None => stream.collect(),
        };

        let mut blocks = fatten(items)?.blocks;
        debug!(blocks = blocks.len(), "stream reconstructed");

        if let Some(interval_ms) = self.opts.interval_ms {
            blocks = quantize_blocks(&blocks, interval_ms)?;
        }
        if let Some(limit) = self.opts.soft_break_chars {
            blocks = soft_break_blocks(&blocks, limit);
        }
        if let Some(limit) = self.opts.hard_break_chars {
            blocks = hard_break_blocks(&blocks, limit);
        }
        Ok(blocks)
    }
}

fn write_blocks<E: BlockEncoder>(blocks: &[Block], encoder: &mut E) -> Result<()> {
    for block in blocks {
        encoder.write_block(block)?;
    }
    encoder.close()
}
