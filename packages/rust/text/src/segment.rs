//! Sentence and word segmentation.
//!
//! Sentence boundaries come from Unicode text segmentation (UAX #29), with
//! boundaries after common abbreviations and initials merged back. When it
//! finds no usable boundary in text that plainly has some, splitting falls
//! back to a naive cut on `.`.

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

/// A single UAX #29 segment longer than this is treated as a detection
/// failure if it still contains interior periods.
const MAX_UNSPLIT_CHARS: usize = 500;

/// Lowercased abbreviations, without their final period, that never end a
/// sentence on their own.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "jr", "sr", "gen", "sen", "rep", "gov", "vs",
    "e.g", "i.e", "u.s", "u.k", "e.u", "u.n",
];

/// Split text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences: Vec<&str> = Vec::new();
    let mut open: Option<usize> = None;

    for (offset, segment) in text.split_sentence_bound_indices() {
        let start = open.take().unwrap_or(offset);
        let candidate = &text[start..offset + segment.len()];
        if ends_with_abbreviation(candidate) {
            open = Some(start);
            continue;
        }
        push_sentence(&mut sentences, candidate);
    }
    if let Some(start) = open {
        push_sentence(&mut sentences, &text[start..]);
    }

    if detection_failed(text, &sentences) {
        debug!(chars = text.chars().count(), "sentence detection failed, splitting on periods");
        return naive_split(text);
    }

    sentences
}

fn push_sentence<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let sentence = candidate.trim();
    if sentence.chars().any(char::is_alphanumeric) {
        sentences.push(sentence);
    }
}

/// True when the segment's last word is a known abbreviation or a single
/// capital initial such as `J.`.
fn ends_with_abbreviation(segment: &str) -> bool {
    let Some(body) = segment.trim_end().strip_suffix('.') else {
        return false;
    };
    let Some(last) = body.split_whitespace().last() else {
        return false;
    };
    let last = last.trim_start_matches(|c: char| !c.is_alphanumeric());

    let mut chars = last.chars();
    if let (Some(initial), None) = (chars.next(), chars.next()) {
        return initial.is_uppercase();
    }
    ABBREVIATIONS.contains(&last.to_lowercase().as_str())
}

fn detection_failed(text: &str, sentences: &[&str]) -> bool {
    match sentences {
        [] => !text.trim().is_empty(),
        [only] => {
            only.chars().count() > MAX_UNSPLIT_CHARS
                && only.trim_end_matches('.').contains('.')
        }
        _ => false,
    }
}

fn naive_split(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Rejoin sentences as `"a. b. c."`.
///
/// Trailing periods on each sentence are folded into the separator so no
/// `..` appears at the seams; sentences ending in `!` or `?` keep their mark.
/// Non-empty output always ends with terminal punctuation.
pub fn join_sentences<S: AsRef<str>>(sentences: &[S]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(sentences.len());

    for sentence in sentences {
        let body = sentence.as_ref().trim().trim_end_matches('.').trim_end();
        if body.is_empty() {
            continue;
        }
        if body.ends_with('!') || body.ends_with('?') {
            parts.push(body.to_string());
        } else {
            parts.push(format!("{body}."));
        }
    }

    parts.join(" ")
}

/// Word tokens per Unicode word boundaries; punctuation-only runs are
/// skipped.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.unicode_words()
}
