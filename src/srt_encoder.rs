use std::io::Write;

use crate::block_encoder::{BlockEncoder, block_text};
use crate::recording::Block;
use crate::timefmt::format_srt_clock;
use crate::{Error, Result};

/// A `BlockEncoder` that writes SubRip (SRT) cues.
///
/// Each cue is sequence-numbered and spans from the start of the block's
/// first word to the end of its last word, with a blank line between cues:
///
/// ```text
/// 1
/// 00:00:00,480 --> 00:00:02,700
/// Hello world. This is a test.
/// ```
pub struct SrtEncoder<W: Write> {
    w: W,

    /// Next cue sequence number; SRT numbering starts at 1.
    sequence: u32,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            sequence: 1,
            closed: false,
        }
    }
}

impl<W: Write> BlockEncoder for SrtEncoder<W> {
    fn write_block(&mut self, block: &Block) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write block: encoder is already closed"));
        }
        if block.is_empty() {
            return Ok(());
        }

        if self.sequence > 1 {
            // Blank line between cues.
            self.w.write_all(b"\n")?;
        }

        let start = format_srt_clock(block.words[0].start_ms);
        let end = format_srt_clock(block.words[block.words.len() - 1].end_ms);
        writeln!(&mut self.w, "{}", self.sequence)?;
        writeln!(&mut self.w, "{start} --> {end}")?;
        writeln!(&mut self.w, "{}", block_text(block))?;
        self.w.flush()?;

        self.sequence += 1;
        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.w.flush()?;
        self.closed = true;
        Ok(())
    }
}
