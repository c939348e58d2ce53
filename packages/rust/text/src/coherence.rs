//! Sentence-level plausibility filter.
//!
//! A sentence survives when its length is within bounds and the tagger
//! finds at least one noun and at least one verb in it.

use tracing::debug;

use crate::pos::{self, PosTag};
use crate::segment::{join_sentences, split_sentences, words};

/// Shortest sentence (in characters) that can pass.
pub const MIN_SENTENCE_CHARS: usize = 10;

/// Longest sentence (in characters) that can pass.
pub const MAX_SENTENCE_CHARS: usize = 500;

/// Drop implausible sentences and rejoin the rest.
pub fn filter_coherent(text: &str) -> String {
    let sentences = split_sentences(text);
    let total = sentences.len();

    let kept: Vec<&str> = sentences.into_iter().filter(|s| is_coherent(s)).collect();

    debug!(total, kept = kept.len(), "coherence filter");
    join_sentences(&kept)
}

/// Length bounds plus a noun and a verb.
pub fn is_coherent(sentence: &str) -> bool {
    let sentence = sentence.trim();
    let len = sentence.chars().count();
    if !(MIN_SENTENCE_CHARS..=MAX_SENTENCE_CHARS).contains(&len) {
        return false;
    }

    let tokens: Vec<&str> = words(sentence).collect();
    if tokens.is_empty() {
        return false;
    }

    let tags = pos::tag(&tokens);
    let has_noun = tags.iter().any(|t| t.is_noun());
    let has_verb = tags.iter().copied().any(PosTag::is_verb);

    has_noun && has_verb
}
