use std::io::Write;

use crate::block_encoder::{BlockEncoder, block_text};
use crate::recording::Block;
use crate::timefmt::format_vtt_clock;
use crate::{Error, Result};

/// The mandatory WebVTT header plus a default cue style.
const VTT_PREAMBLE: &str = "WEBVTT\n\nSTYLE\n::cue {\n  background-color: rgba(0, 0, 0, 0.6);\n  color: #ffffff;\n}\n\n";

/// A `BlockEncoder` that writes WebVTT cues.
///
/// Design:
/// - We stream output directly to a `Write` implementation.
/// - We write the header/style preamble lazily on the first block so that:
///   - callers can construct the encoder without immediately writing output
///   - even "no blocks" runs still behave predictably (close just flushes)
pub struct VttEncoder<W: Write> {
    /// The underlying writer we stream VTT into.
    w: W,

    /// Whether we've written the preamble.
    started: bool,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> VttEncoder<W> {
    /// Create a new VTT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            closed: false,
        }
    }

    /// Write the preamble if we haven't written it yet.
    fn start_if_needed(&mut self) -> Result<()> {
        if !self.started {
            self.w.write_all(VTT_PREAMBLE.as_bytes())?;
            self.started = true;
        }
        Ok(())
    }
}

impl<W: Write> BlockEncoder for VttEncoder<W> {
    /// Write a single cue spanning the block's first and last word.
    fn write_block(&mut self, block: &Block) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write block: encoder is already closed"));
        }
        if block.is_empty() {
            return Ok(());
        }

        self.start_if_needed()?;

        // WebVTT timestamps use `HH:MM:SS.mmm`.
        let start = format_vtt_clock(block.words[0].start_ms);
        let end = format_vtt_clock(block.words[block.words.len() - 1].end_ms);

        // Cue timing line, cue text, then the blank line separating cues.
        writeln!(&mut self.w, "{start} --> {end}")?;
        writeln!(&mut self.w, "{}", block_text(block))?;
        writeln!(&mut self.w)?;

        // Flush so streaming consumers (stdout, pipes, sockets) see output promptly.
        self.w.flush()?;

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
