//! Word-level token pipeline: tokenize, keep alphanumeric words, drop
//! stopwords and short words, lemmatize.

use std::collections::{HashMap, HashSet};

use postforge_text::words;

/// Tokens shorter than this (in characters) never become keywords.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Standard English stopword list.
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
    "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
    "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y", "ain",
    "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't", "hadn",
    "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn",
    "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
    "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
];

/// Plurals that suffix rules get wrong.
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
    ("indices", "index"),
    ("matrices", "matrix"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("knives", "knife"),
    ("wives", "wife"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("wolves", "wolf"),
    ("calves", "calf"),
    ("thieves", "thief"),
    ("loaves", "loaf"),
    ("scarves", "scarf"),
    ("selves", "self"),
    ("hooves", "hoof"),
    ("buses", "bus"),
    ("gases", "gas"),
    ("goes", "go"),
    ("heroes", "hero"),
    ("echoes", "echo"),
    ("vetoes", "veto"),
    ("potatoes", "potato"),
    ("tomatoes", "tomato"),
];

/// Singulars whose plural only adds `s` where a suffix rule would strip
/// more (`movies` is not `movy`, `niches` is not `nich`).
const PLAIN_S_SINGULARS: &[&str] = &[
    "movie", "cookie", "calorie", "zombie", "rookie", "selfie", "smoothie", "brownie",
    "prairie", "goalie", "freebie", "hoodie", "niche", "cache", "headache", "backache",
    "heartache", "toothache", "ache", "avalanche", "cliche", "quiche", "psyche", "mustache",
    "moustache", "axe",
];

/// Words ending in `s` that are already base forms.
const INVARIANT_NOUNS: &[&str] = &[
    "news", "series", "species", "means", "physics", "economics", "politics", "logistics",
    "analytics", "electronics", "robotics", "mathematics", "statistics", "ethics", "chaos",
    "lens", "atlas", "canvas", "whereas", "always", "perhaps", "sometimes", "towards",
    "afterwards", "headquarters", "diabetes",
];

/// Dictionary-backed noun lemmatizer.
///
/// Irregular forms come from a lookup table; everything else goes through
/// plural-suffix rules guarded against words that merely end in `s`.
/// `-ves` plurals other than the tabled `f`/`fe` nouns keep their `e`
/// (`archives` to `archive`).
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    invariant: HashSet<&'static str>,
    plain_s: HashSet<&'static str>,
}

impl Lemmatizer {
    pub fn english() -> Self {
        Self {
            irregular: IRREGULAR_PLURALS.iter().copied().collect(),
            invariant: INVARIANT_NOUNS.iter().copied().collect(),
            plain_s: PLAIN_S_SINGULARS.iter().copied().collect(),
        }
    }

    /// Base form of a lowercase word.
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(base) = self.irregular.get(word) {
            return (*base).to_string();
        }
        if self.invariant.contains(word) {
            return word.to_string();
        }

        let len = word.chars().count();
        if len <= 3 || !word.ends_with('s') {
            return word.to_string();
        }
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_string();
        }

        let singular = &word[..word.len() - 1];
        if self.plain_s.contains(singular) {
            return singular.to_string();
        }
        if len > 4 {
            if let Some(stem) = word.strip_suffix("ies") {
                return format!("{stem}y");
            }
        }
        for suffix in ["sses", "xes", "ches", "shes"] {
            if word.ends_with(suffix) {
                return word[..word.len() - 2].to_string();
            }
        }

        singular.to_string()
    }
}

/// Once-loaded language resources: stopword set and lemmatizer.
#[derive(Debug, Clone)]
pub struct LanguageModel {
    stopwords: HashSet<&'static str>,
    lemmatizer: Lemmatizer,
}

impl LanguageModel {
    pub fn english() -> Self {
        Self {
            stopwords: ENGLISH_STOPWORDS.iter().copied().collect(),
            lemmatizer: Lemmatizer::english(),
        }
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    pub fn lemmatize(&self, word: &str) -> String {
        self.lemmatizer.lemmatize(word)
    }

    /// Lowercased alphanumeric words, in order. A possessive `'s` is cut
    /// off first so `Tesla's` counts as `tesla`; other contractions are
    /// dropped whole.
    fn alnum_words(text: &str) -> impl Iterator<Item = String> + '_ {
        words(text)
            .map(|w| strip_possessive(&w.to_lowercase()).to_string())
            .filter(|w| !w.is_empty() && w.chars().all(char::is_alphanumeric))
    }

    /// The keyword token stream: alphanumeric, no stopwords, at least
    /// [`MIN_TOKEN_CHARS`] long, lemmatized. Duplicates are kept.
    pub fn filtered_tokens(&self, text: &str) -> Vec<String> {
        Self::alnum_words(text)
            .filter(|w| !self.is_stopword(w) && w.chars().count() >= MIN_TOKEN_CHARS)
            .map(|w| self.lemmatize(&w))
            .collect()
    }

    /// Tokens used for bigram themes: alphanumeric and not stopwords. No
    /// length cut and no lemmatization.
    pub fn phrase_tokens(&self, sentence: &str) -> Vec<String> {
        Self::alnum_words(sentence)
            .filter(|w| !self.is_stopword(w))
            .collect()
    }
}

fn strip_possessive(word: &str) -> &str {
    word.strip_suffix("'s")
        .or_else(|| word.strip_suffix("\u{2019}s"))
        .unwrap_or(word)
}

impl Default for LanguageModel {
    fn default() -> Self {
        Self::english()
    }
}
