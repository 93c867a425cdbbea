//! Whole-word search and replace over the flat stream.
//!
//! Replacements are an ordered list of `(target, replacement)` pairs. For
//! each word the first pair whose target matches as a word-boundary-delimited,
//! case-sensitive token wins; that one pair is substituted globally within
//! the word and no further pairs are layered on top.

use regex::Regex;

use crate::error::Result;
use crate::flat::Item;
use crate::word::Word;

/// An ordered, compiled set of replacement pairs.
#[derive(Debug, Clone)]
pub struct Replacements {
    pairs: Vec<(Regex, String)>,
}

impl Replacements {
    /// Compile an ordered list of `(target, replacement)` pairs.
    ///
    /// Both sides are taken literally: regex metacharacters in a target match
    /// themselves, and `$` in a replacement is emitted as a dollar sign, not
    /// interpreted as a capture reference.
    pub fn compile(pairs: &[(String, String)]) -> Result<Self> {
        let mut compiled = Vec::with_capacity(pairs.len());
        for (target, replacement) in pairs {
            let pattern = format!(r"\b{}\b", regex::escape(target));
            compiled.push((Regex::new(&pattern)?, replacement.replace('$', "$$")));
        }
        Ok(Self { pairs: compiled })
    }

    /// Apply the first matching pair to one word.
    ///
    /// Words matching no pair keep their text but are still re-normalized,
    /// so every word leaving this transform satisfies the canonical-form
    /// invariant.
    fn apply(&self, word: &Word) -> Word {
        let display = word.display();
        for (pattern, replacement) in &self.pairs {
            if pattern.is_match(display) {
                let replaced = pattern.replace_all(display, replacement.as_str());
                return word.rewrite(&replaced);
            }
        }
        word.rewrite(display)
    }
}

/// Substitute configured word pairs throughout the stream.
pub fn replace_words<I>(items: I, replacements: Replacements) -> ReplaceWords<I::IntoIter>
where
    I: IntoIterator<Item = Item>,
{
    ReplaceWords {
        inner: items.into_iter(),
        replacements,
    }
}

/// Lazy iterator produced by [`replace_words`].
pub struct ReplaceWords<I> {
    inner: I,
    replacements: Replacements,
}

impl<I: Iterator<Item = Item>> Iterator for ReplaceWords<I> {
    type Item = Item;

    fn next(&mut self) -> Option<Item> {
        match self.inner.next()? {
            Item::Header(header) => Some(Item::Header(header)),
            Item::Word(word) => Some(Item::Word(self.replacements.apply(&word))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Replacements {
        let owned: Vec<(String, String)> = raw
            .iter()
            .map(|(t, r)| (t.to_string(), r.to_string()))
            .collect();
        Replacements::compile(&owned).expect("pairs compile")
    }

    fn apply_stream(replacements: Replacements, words: Vec<Word>) -> Vec<Word> {
        replace_words(words.into_iter().map(Item::Word).collect::<Vec<_>>(), replacements)
            .map(|item| match item {
                Item::Word(w) => w,
                Item::Header(_) => panic!("unexpected header"),
            })
            .collect()
    }

    #[test]
    fn replaces_whole_word_tokens_case_sensitively() {
        let out = apply_stream(
            pairs(&[("i", "I"), ("not", "yet")]),
            vec![
                Word::from_display("I", 0, 10),
                Word::from_display("write,", 12, 20),
                Word::from_display("i", 22, 30),
                Word::from_display("note:", 32, 40),
                Word::from_display("*not*", 42, 50),
                Word::from_display("i", 52, 60),
            ],
        );

        let forms: Vec<(&str, &str)> = out.iter().map(|w| (w.text.as_str(), w.display())).collect();
        assert_eq!(
            forms,
            vec![
                ("i", "I"),       // uppercase "I" is not the lowercase target
                ("write", "write,"),
                ("i", "I"),       // replaced, canonical re-derived
                ("note", "note:"),
                ("yet", "*yet*"), // boundary match inside punctuation
                ("i", "I"),
            ]
        );
    }

    #[test]
    fn first_matching_pair_wins_and_is_not_layered() {
        let out = apply_stream(
            pairs(&[("cat", "dog"), ("dog", "wolf")]),
            vec![Word::from_display("cat", 0, 10)],
        );
        // "cat" -> "dog" stops there; the second pair never sees the result.
        assert_eq!(out[0].text, "dog");
    }

    #[test]
    fn substitution_is_global_within_a_word() {
        let out = apply_stream(
            pairs(&[("a", "b")]),
            vec![Word::from_display("a-a", 0, 10)],
        );
        assert_eq!(out[0].text, "b-b");
    }

    #[test]
    fn metacharacters_in_targets_and_replacements_stay_literal() {
        let out = apply_stream(
            pairs(&[("2+2", "4"), ("cost", "$1")]),
            vec![
                Word::from_display("2+2", 0, 10),
                Word::from_display("cost", 12, 20),
            ],
        );
        assert_eq!(out[0].text, "4");
        // "$1" must not be read as a capture reference.
        assert_eq!(out[1].display(), "$1");
        assert_eq!(out[1].text, "1");
    }

    #[test]
    fn unmatched_words_are_still_renormalized() {
        let denormalized = Word {
            text: "HELLO,".into(),
            decorated: Some("Hello,".into()),
            start_ms: 0,
            end_ms: 10,
            ..Word::default()
        };
        let out = apply_stream(pairs(&[("x", "y")]), vec![denormalized]);
        assert_eq!(out[0].text, "hello");
        assert_eq!(out[0].display(), "Hello,");
    }
}
