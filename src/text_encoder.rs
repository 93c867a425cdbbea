use std::io::Write;

use crate::block_encoder::{BlockEncoder, block_text};
use crate::recording::Block;
use crate::{Error, Result};

/// A `BlockEncoder` that writes plain space-joined text.
///
/// Words are joined with single spaces, and so are the blocks themselves;
/// the output carries no timing at all.
pub struct TextEncoder<W: Write> {
    w: W,

    /// Whether a block has been written yet (controls the joining space).
    started: bool,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> TextEncoder<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            started: false,
            closed: false,
        }
    }
}

impl<W: Write> BlockEncoder for TextEncoder<W> {
    fn write_block(&mut self, block: &Block) -> Result<()> {
        if self.closed {
            return Err(Error::msg("cannot write block: encoder is already closed"));
        }
        if block.is_empty() {
            return Ok(());
        }

        if self.started {
            self.w.write_all(b" ")?;
        }
        self.started = true;

        self.w.write_all(block_text(block).as_bytes())?;
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
