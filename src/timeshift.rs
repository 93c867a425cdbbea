//! Constant time offset across a flat stream.

use crate::flat::Item;

/// Shift every word's start and end by `offset_ms`, leaving headers alone.
///
/// The shift is applied eagerly and produces new word records. Nothing is
/// clamped: a negative offset can push timestamps below zero, and they are
/// preserved as-is (display is the renderers' problem).
pub fn timeshift<I>(items: I, offset_ms: i64) -> Vec<Item>
where
    I: IntoIterator<Item = Item>,
{
    items
        .into_iter()
        .map(|item| match item {
            Item::Word(word) => {
                let shifted = word.with_times(word.start_ms + offset_ms, word.end_ms + offset_ms);
                Item::Word(shifted)
            }
            header => header,
        })
        .collect()
}
