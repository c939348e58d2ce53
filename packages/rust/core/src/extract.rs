//! Frequency-ranked keyword and theme extraction.

use std::collections::HashMap;

use postforge_text::split_sentences;

use crate::tokens::LanguageModel;

/// Keywords kept per record.
pub const MAX_KEYWORDS: usize = 10;

/// Themes kept per record.
pub const MAX_THEMES: usize = 5;

/// Rank items by descending count; equal counts keep first-seen order.
pub fn rank_by_frequency<I>(items: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for item in items {
        let next = counts.len();
        counts.entry(item).or_insert((0, next)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(item, (count, first_seen))| (item, count, first_seen))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(limit).map(|(item, ..)| item).collect()
}

/// Top [`MAX_KEYWORDS`] tokens of an already filtered token stream.
pub fn extract_keywords(tokens: &[String]) -> Vec<String> {
    rank_by_frequency(tokens.iter().cloned(), MAX_KEYWORDS)
}

/// Top [`MAX_THEMES`] adjacent-word pairs, formed within each sentence
/// only.
pub fn extract_themes(text: &str, language: &LanguageModel) -> Vec<String> {
    let bigrams = split_sentences(text).into_iter().flat_map(|sentence| {
        let tokens = language.phrase_tokens(sentence);
        tokens
            .windows(2)
            .map(|pair| format!("{} {}", pair[0], pair[1]))
            .collect::<Vec<_>>()
    });
    rank_by_frequency(bigrams, MAX_THEMES)
}
