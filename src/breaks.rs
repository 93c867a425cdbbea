//! Character-limit block segmentation: soft (punctuation-aware) and hard
//! (unconditional) breaking.
//!
//! Both walk a block's words accumulating canonical text lengths, and both
//! copy the source block's locale metadata onto every fragment they produce.

use crate::recording::Block;
use crate::word::Word;

/// Punctuation that may close a soft-broken fragment.
const TERMINAL_PUNCTUATION: [char; 6] = ['.', ',', ';', ':', '!', '?'];

fn ends_in_terminal_punctuation(display: &str) -> bool {
    display
        .trim_end()
        .chars()
        .next_back()
        .is_some_and(|c| TERMINAL_PUNCTUATION.contains(&c))
}

/// Split a block after each word that both exceeds `limit` accumulated
/// characters and ends a clause.
///
/// The break happens *after* the closing word, so fragments always end on
/// punctuation. A block that never exceeds the limit is returned whole.
pub fn soft_break_block(block: &Block, limit: usize) -> Vec<Block> {
    let mut fragments = Vec::new();
    let mut words: Vec<Word> = Vec::new();
    let mut count = 0usize;

    for word in &block.words {
        count += word.text.chars().count();
        words.push(word.clone());
        if count > limit && ends_in_terminal_punctuation(word.display()) {
            fragments.push(block.fragment(std::mem::take(&mut words)));
            count = 0;
        }
    }
    if !words.is_empty() {
        fragments.push(block.fragment(words));
    }

    if fragments.is_empty() {
        // Nothing to break (a wordless block); hand it back untouched.
        return vec![block.clone()];
    }
    fragments
}

/// Soft-break every block in a list, preserving order.
pub fn soft_break_blocks(blocks: &[Block], limit: usize) -> Vec<Block> {
    blocks
        .iter()
        .flat_map(|block| soft_break_block(block, limit))
        .collect()
}

/// Split a block unconditionally at each word that would push the running
/// count over `limit`; the new fragment starts *at* that word.
///
/// A fragment is never closed while empty, so every fragment carries at
/// least one word even when a single word exceeds the limit by itself.
pub fn hard_break_block(block: &Block, limit: usize) -> Vec<Block> {
    let mut fragments = Vec::new();
    let mut words: Vec<Word> = Vec::new();
    let mut count = 0usize;

    for word in &block.words {
        let len = word.text.chars().count();
        if !words.is_empty() && count + len > limit {
            fragments.push(block.fragment(std::mem::take(&mut words)));
            count = 0;
        }
        words.push(word.clone());
        count += len;
    }
    if !words.is_empty() {
        fragments.push(block.fragment(words));
    }

    if fragments.is_empty() {
        return vec![block.clone()];
    }
    fragments
}

/// Hard-break every block in a list, preserving order.
pub fn hard_break_blocks(blocks: &[Block], limit: usize) -> Vec<Block> {
    blocks
        .iter()
        .flat_map(|block| hard_break_block(block, limit))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_of(displays: &[&str]) -> Block {
        let words = displays
            .iter()
            .enumerate()
            .map(|(i, d)| Word::from_display(*d, i as i64 * 100, i as i64 * 100 + 90))
            .collect();
        Block::new(words, true, Some("en-US".into()))
    }

    #[test]
    fn soft_break_waits_for_terminal_punctuation() {
        // Only words 2 and 6 close a clause; with a limit below the first two
        // words' combined length, the only boundary lands after word 2.
        let block = block_of(&["alpha", "beta.", "gamma", "delta", "epsilon", "zeta."]);
        let fragments = soft_break_block(&block, 6);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].words.len(), 2);
        assert_eq!(fragments[1].words.len(), 4);
        let closing = fragments[0].words.last().unwrap();
        assert!(ends_in_terminal_punctuation(closing.display()));
    }

    #[test]
    fn soft_break_returns_short_blocks_whole() {
        let block = block_of(&["tiny.", "bit."]);
        let fragments = soft_break_block(&block, 100);
        assert_eq!(fragments, vec![block]);
    }

    #[test]
    fn soft_break_copies_locale_metadata_onto_fragments() {
        let block = block_of(&["one,", "two,", "three,"]);
        for fragment in soft_break_block(&block, 3) {
            assert!(fragment.is_new_locale);
            assert_eq!(fragment.locale.as_deref(), Some("en-US"));
        }
    }

    #[test]
    fn hard_break_splits_at_the_overflowing_word() {
        let block = block_of(&["aaaa", "bbbb", "cccc"]);
        let fragments = hard_break_block(&block, 8);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].words.len(), 2);
        // The overflowing word starts the new fragment rather than ending the old one.
        assert_eq!(fragments[1].words[0].text, "cccc");
    }

    #[test]
    fn hard_break_never_emits_an_empty_fragment() {
        // Every word is longer than the limit; each still gets its own fragment.
        let block = block_of(&["sesquipedalian", "floccinaucinihilipilification"]);
        let fragments = hard_break_block(&block, 4);
        assert_eq!(fragments.len(), 2);
        assert!(fragments.iter().all(|f| f.words.len() == 1));
    }

    #[test]
    fn hard_break_preserves_the_word_sequence() {
        let block = block_of(&["one", "two", "three", "four", "five", "six"]);
        let fragments = hard_break_block(&block, 7);
        let rejoined: Vec<&str> = fragments
            .iter()
            .flat_map(|f| f.words.iter().map(|w| w.text.as_str()))
            .collect();
        assert_eq!(rejoined, vec!["one", "two", "three", "four", "five", "six"]);
    }
}
