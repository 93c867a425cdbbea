//! Hyphen-aware word splitting and joining over the flat stream.
//!
//! Both transforms are lazy, single-pass iterator adapters: headers pass
//! through untouched and words are re-tokenized (split) or accumulated
//! (join). The two are deliberately asymmetric and are not exact inverses:
//! splitting keys on hyphen runs *inside* a word, joining keys on the
//! *trailing* run only.
//!
//! Split semantics, per internal hyphen run (leading hyphens don't count as
//! a run):
//! - run of 1 (`-`): no split; the token folds into a prefix carried to the
//!   next token, keeping the earliest start time
//! - run of 2 (`--`): split; the run is dropped
//! - run of 3+ (`---`): split; the emitted word keeps a `--` suffix
//! - a run touching the end of the word is never a split point
//!
//! Timing is re-sliced proportionally across the extracted tokens; each
//! token starts where the previous one ended.

use std::collections::VecDeque;
use std::sync::OnceLock;

use regex::Regex;

use crate::flat::Item;
use crate::word::Word;

/// One leading-hyphen-tolerant token: optional leading hyphens, a non-hyphen
/// run, then the complete hyphen run that follows it (empty only at the end
/// of the word).
fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(-*)([^-]+)(-*)").expect("hyphen token pattern is valid"))
}

/// Split words on internal hyphen runs, re-slicing their timing.
pub fn split_hyphens<I>(items: I) -> SplitHyphens<I::IntoIter>
where
    I: IntoIterator<Item = Item>,
{
    SplitHyphens {
        inner: items.into_iter(),
        queue: VecDeque::new(),
    }
}

/// Lazy iterator produced by [`split_hyphens`].
pub struct SplitHyphens<I> {
    inner: I,
    queue: VecDeque<Item>,
}

impl<I: Iterator<Item = Item>> Iterator for SplitHyphens<I> {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        loop {
            if let Some(item) = self.queue.pop_front() {
                return Some(item);
            }
            match self.inner.next()? {
                Item::Header(header) => return Some(Item::Header(header)),
                Item::Word(word) => {
                    for token in split_word(&word) {
                        self.queue.push_back(Item::Word(token));
                    }
                }
            }
        }
    }
}

/// A raw regex token: its text (leading hyphens included), the length of the
/// hyphen run that follows it, and whether that run touches the end of the word.
struct RawToken<'a> {
    lead: &'a str,
    body: &'a str,
    run: usize,
    at_end: bool,
}

fn split_word(word: &Word) -> Vec<Word> {
    let display = word.display();

    let mut raw: Vec<RawToken<'_>> = Vec::new();
    for caps in token_pattern().captures_iter(display) {
        let whole = caps.get(0).expect("match always has a full capture");
        let sep = caps.get(3).map_or("", |m| m.as_str());
        raw.push(RawToken {
            lead: caps.get(1).map_or("", |m| m.as_str()),
            body: caps.get(2).map_or("", |m| m.as_str()),
            run: sep.len(),
            at_end: whole.end() == display.len(),
        });
    }

    // All-hyphen words (or a single token) have nothing to split.
    if raw.len() <= 1 {
        return vec![word.clone()];
    }

    let n = raw.len() as i64;
    let span = word.end_ms - word.start_ms + 1;

    let mut out = Vec::new();
    let mut prev_end = word.start_ms;
    let mut pending: Option<(String, i64)> = None;

    for (i, token) in raw.iter().enumerate() {
        // Each token starts where the previous slice ended; the first keeps
        // the original word start.
        let slice_start = if i == 0 { word.start_ms } else { prev_end };
        let slice_end = (span * (i as i64 + 1)).div_euclid(n) + word.start_ms - 1;
        prev_end = slice_end;

        // A run-of-1 carry keeps the earliest accumulated start.
        let (mut text, start) = match pending.take() {
            Some((prefix, start)) => (prefix, start),
            None => (String::new(), slice_start),
        };
        text.push_str(token.lead);
        text.push_str(token.body);

        if token.at_end {
            // Trailing material is appended as-is, never split off.
            text.extend(std::iter::repeat_n('-', token.run));
            out.push(word.rebuild(&text, start, slice_end));
        } else {
            match token.run {
                1 => {
                    text.push('-');
                    pending = Some((text, start));
                }
                2 => out.push(word.rebuild(&text, start, slice_end)),
                _ => {
                    text.push_str("--");
                    out.push(word.rebuild(&text, start, slice_end));
                }
            }
        }
    }

    debug_assert!(pending.is_none(), "final token always flushes the carry");
    out
}

/// Join words whose trailing hyphen run marks a continuation.
pub fn join_hyphens<I>(items: I) -> JoinHyphens<I::IntoIter>
where
    I: IntoIterator<Item = Item>,
{
    JoinHyphens {
        inner: items.into_iter(),
        pending: None,
        done: false,
    }
}

/// Words accumulated so far, waiting for the token that completes them.
struct Pending {
    text: String,
    start_ms: i64,
    // The most recent accumulated word; supplies timing and payload if the
    // stream ends before the continuation arrives.
    last: Word,
}

/// Lazy iterator produced by [`join_hyphens`].
pub struct JoinHyphens<I> {
    inner: I,
    pending: Option<Pending>,
    done: bool,
}

impl<I: Iterator<Item = Item>> Iterator for JoinHyphens<I> {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        loop {
            if self.done {
                return None;
            }
            match self.inner.next() {
                None => {
                    self.done = true;
                    // Flush a dangling accumulation instead of dropping words.
                    let pending = self.pending.take()?;
                    let end_ms = pending.last.end_ms;
                    return Some(Item::Word(pending.last.rebuild(
                        &pending.text,
                        pending.start_ms,
                        end_ms,
                    )));
                }
                // Headers do not interact with the pending state.
                Some(Item::Header(header)) => return Some(Item::Header(header)),
                Some(Item::Word(word)) => {
                    let display = word.display();
                    let run = trailing_hyphen_run(display);
                    match run {
                        1 | 3 => {
                            // Strip the run; a triple leaves a single hyphen
                            // marker in the reconstruction.
                            let stripped = &display[..display.len() - run];
                            let marker = if run == 3 { "-" } else { "" };
                            match &mut self.pending {
                                Some(pending) => {
                                    pending.text.push_str(stripped);
                                    pending.text.push_str(marker);
                                    pending.last = word.clone();
                                }
                                None => {
                                    self.pending = Some(Pending {
                                        text: format!("{stripped}{marker}"),
                                        start_ms: word.start_ms,
                                        last: word.clone(),
                                    });
                                }
                            }
                        }
                        _ => {
                            // No continuation marker (a double hyphen reads
                            // as "keep as-is"): emit, completing any pending run.
                            return Some(Item::Word(match self.pending.take() {
                                Some(pending) => {
                                    let text = format!("{}{}", pending.text, display);
                                    word.rebuild(&text, pending.start_ms, word.end_ms)
                                }
                                None => word,
                            }));
                        }
                    }
                }
            }
        }
    }
}

fn trailing_hyphen_run(display: &str) -> usize {
    display.bytes().rev().take_while(|b| *b == b'-').count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flat::Header;

    fn word(display: &str, start_ms: i64, end_ms: i64) -> Word {
        Word::from_display(display, start_ms, end_ms)
    }

    fn split_one(display: &str, start_ms: i64, end_ms: i64) -> Vec<Word> {
        split_hyphens(vec![Item::Word(word(display, start_ms, end_ms))])
            .map(|item| match item {
                Item::Word(w) => w,
                Item::Header(_) => panic!("unexpected header"),
            })
            .collect()
    }

    #[test]
    fn split_leaves_plain_words_alone() {
        let out = split_one("hello", 0, 999);
        assert_eq!(out, vec![word("hello", 0, 999)]);
    }

    #[test]
    fn split_breaks_on_double_hyphen_and_drops_the_run() {
        let out = split_one("check--in", 1000, 1999);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "check");
        assert_eq!(out[1].text, "in");
        // Two tokens over a 1000ms span: boundary at the proportional midpoint.
        assert_eq!((out[0].start_ms, out[0].end_ms), (1000, 1499));
        assert_eq!((out[1].start_ms, out[1].end_ms), (1499, 1999));
    }

    #[test]
    fn split_keeps_a_double_hyphen_suffix_on_triple_runs() {
        let out = split_one("wait---what", 0, 999);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].display(), "wait--");
        assert_eq!(out[0].text, "wait");
        assert_eq!(out[1].text, "what");
    }

    #[test]
    fn split_carries_single_hyphen_tokens_forward() {
        // Single-hyphen runs are compound hyphens, not split points; the
        // merged token spans from the earliest carried start.
        let out = split_one("mother-in-law", 0, 2999);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display(), "mother-in-law");
        assert_eq!((out[0].start_ms, out[0].end_ms), (0, 2999));
    }

    #[test]
    fn split_mixes_carries_and_breaks() {
        let out = split_one("drop-down--menu", 0, 2999);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].display(), "drop-down");
        assert_eq!(out[1].display(), "menu");
        // Merged token keeps the earliest start; boundary falls at the
        // second-of-three proportional slices.
        assert_eq!((out[0].start_ms, out[0].end_ms), (0, 1999));
        assert_eq!((out[1].start_ms, out[1].end_ms), (1999, 2999));
    }

    #[test]
    fn split_never_breaks_a_word_final_run() {
        let out = split_one("trailing--", 0, 999);
        assert_eq!(out, vec![word("trailing--", 0, 999)]);

        let out = split_one("a--b--", 0, 999);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "a");
        assert_eq!(out[1].display(), "b--");
    }

    #[test]
    fn split_passes_headers_through() {
        let stream = vec![
            Item::Header(Header::top()),
            Item::Word(word("re--do", 0, 99)),
        ];
        let out: Vec<Item> = split_hyphens(stream).collect();
        assert_eq!(out.len(), 3);
        assert!(matches!(out[0], Item::Header(_)));
    }

    #[test]
    fn split_is_idempotent_once_runs_are_resolved() {
        let first: Vec<Item> = split_hyphens(vec![Item::Word(word("check--in", 0, 999))]).collect();
        let second: Vec<Item> = split_hyphens(first.clone()).collect();
        assert_eq!(first, second);
    }

    fn join_all(items: Vec<Item>) -> Vec<Word> {
        join_hyphens(items)
            .filter_map(|item| match item {
                Item::Word(w) => Some(w),
                Item::Header(_) => None,
            })
            .collect()
    }

    #[test]
    fn join_merges_a_single_trailing_hyphen() {
        let out = join_all(vec![
            Item::Word(word("hy-", 100, 400)),
            Item::Word(word("phen", 450, 900)),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "hyphen");
        assert_eq!((out[0].start_ms, out[0].end_ms), (100, 900));
    }

    #[test]
    fn join_keeps_one_hyphen_from_a_triple_run() {
        let out = join_all(vec![
            Item::Word(word("foo---", 0, 10)),
            Item::Word(word("bar", 20, 30)),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].display(), "foo-bar");
    }

    #[test]
    fn join_leaves_double_hyphens_as_is() {
        let out = join_all(vec![
            Item::Word(word("wait--", 0, 10)),
            Item::Word(word("what", 20, 30)),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].display(), "wait--");
        assert_eq!(out[1].text, "what");
    }

    #[test]
    fn join_accumulates_across_several_words() {
        let out = join_all(vec![
            Item::Word(word("mo-", 0, 10)),
            Item::Word(word("ther-", 12, 20)),
            Item::Word(word("board", 22, 30)),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "motherboard");
        assert_eq!((out[0].start_ms, out[0].end_ms), (0, 30));
    }

    #[test]
    fn join_pending_state_survives_headers() {
        let stream = vec![
            Item::Word(word("hy-", 0, 10)),
            Item::Header(Header::block(false, None)),
            Item::Word(word("phen", 20, 30)),
        ];
        let out: Vec<Item> = join_hyphens(stream).collect();
        assert!(matches!(out[0], Item::Header(_)));
        match &out[1] {
            Item::Word(w) => assert_eq!(w.text, "hyphen"),
            other => panic!("expected a word, got {other:?}"),
        }
    }

    #[test]
    fn join_flushes_a_dangling_accumulation_at_end_of_stream() {
        let out = join_all(vec![Item::Word(word("dangling-", 0, 10))]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].text, "dangling");
    }

    #[test]
    fn join_is_idempotent_without_trailing_hyphens() {
        let stream = vec![
            Item::Word(word("plain", 0, 10)),
            Item::Word(word("wait--", 12, 20)),
        ];
        let once: Vec<Item> = join_hyphens(stream.clone()).collect();
        assert_eq!(once, stream);
    }
}
