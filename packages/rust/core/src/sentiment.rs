//! Lexicon-intersection polarity.

use std::collections::HashSet;

use postforge_shared::Sentiment;

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "positive",
    "innovative",
    "successful",
    "beneficial",
    "growth",
    "advance",
    "breakthrough",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "poor",
    "negative",
    "problematic",
    "challenging",
    "difficult",
    "issue",
    "decline",
    "crisis",
    "failure",
];

/// Fixed positive and negative word sets.
#[derive(Debug, Clone)]
pub struct SentimentLexicon {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
}

impl SentimentLexicon {
    pub fn english() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
        }
    }

    /// Compare how many *distinct* lexicon words each side shares with the
    /// tokens. Repeats do not add weight; a tie is neutral.
    pub fn classify(&self, tokens: &[String]) -> Sentiment {
        let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        let positive = distinct.iter().filter(|t| self.positive.contains(*t)).count();
        let negative = distinct.iter().filter(|t| self.negative.contains(*t)).count();

        match positive.cmp(&negative) {
            std::cmp::Ordering::Greater => Sentiment::Positive,
            std::cmp::Ordering::Less => Sentiment::Negative,
            std::cmp::Ordering::Equal => Sentiment::Neutral,
        }
    }
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self::english()
    }
}
