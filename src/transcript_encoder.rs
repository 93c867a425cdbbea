use std::io::Write;

use crate::block_encoder::{BlockEncoder, block_text};
use crate::recording::Block;
use crate::timefmt::format_minutes;
use crate::{Error, Result};

/// A `BlockEncoder` that writes one `M:SS<TAB>text` line per block.
///
/// The timestamp is the start of the block's first word.
pub struct TranscriptEncoder<W: Write> {
    w: W,

    /// Whether a line has been written yet (controls the joining newline).
    started: bool,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> TranscriptEncoder<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            closed: false,
        }
    }
}

impl<W: Write> BlockEncoder for TranscriptEncoder<W> {
    fn write_block(&mut self, block: &Block) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write block: encoder is already closed"));
        }
        if block.is_empty() {
            return Ok(());
        }

        if self.started {
            self.w.write_all(b"\n")?;
        }
        self.started = true;

        let stamp = format_minutes(block.words[0].start_ms);
        write!(&mut self.w, "{stamp}\t{}", block_text(block))?;
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
