//! Repeated-sentence removal.

use std::collections::HashSet;

use tracing::debug;

use crate::segment::{join_sentences, split_sentences};

/// Normalized sentences this short or shorter are dropped as fragments.
pub const MIN_DEDUP_CHARS: usize = 10;

/// Keep the first occurrence of every sentence, in order.
///
/// Sentences are compared lowercased and trimmed; fragments of at most
/// [`MIN_DEDUP_CHARS`] characters are dropped along with repeats.
pub fn dedup_sentences(text: &str) -> String {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique: Vec<&str> = Vec::new();
    let mut dropped = 0usize;

    for sentence in split_sentences(text) {
        let normalized = sentence.trim().to_lowercase();
        if normalized.chars().count() > MIN_DEDUP_CHARS && seen.insert(normalized) {
            unique.push(sentence);
        } else {
            dropped += 1;
        }
    }

    if dropped > 0 {
        debug!(dropped, kept = unique.len(), "removed duplicate or fragment sentences");
    }
    join_sentences(&unique)
}
