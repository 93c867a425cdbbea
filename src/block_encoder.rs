use crate::Result;
use crate::recording::Block;

/// A streaming renderer: blocks in, formatted caption text out.
///
/// Encoders skip blocks with no words (they carry no timing to render).
pub trait BlockEncoder {
    fn write_block(&mut self, block: &Block) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}

/// Join a block's words into display text, single-space separated.
pub(crate) fn block_text(block: &Block) -> String {
    let mut text = String::new();
    for word in &block.words {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(word.display().trim());
    }
    text
}
