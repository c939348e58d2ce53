//! Whitespace, quote, and punctuation canonicalization.
//!
//! Every pass is a function `&str -> String`; [`normalize`] runs them in
//! sequence. The result is a fixed point: normalizing twice changes nothing.

use std::sync::LazyLock;

use regex::Regex;

/// Run the full normalization pipeline on raw scraped text.
pub fn normalize(text: &str) -> String {
    let mut result = collapse_whitespace(text);

    result = straighten_quotes(&result);
    result = collapse_punctuation(&result);

    result
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Replace typographic quotes and apostrophes with their ASCII forms.
fn straighten_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{00AB}' | '\u{00BB}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' => '\'',
            other => other,
        })
        .collect()
}

/// `....` → `...`, `!!` → `!`, `??` → `?`.
fn collapse_punctuation(text: &str) -> String {
    static ELLIPSIS_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\.{3,}").expect("valid regex"));
    static BANG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!{2,}").expect("valid regex"));
    static QUESTION_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\?{2,}").expect("valid regex"));

    let result = ELLIPSIS_RE.replace_all(text, "...");
    let result = BANG_RE.replace_all(&result, "!");
    QUESTION_RE.replace_all(&result, "?").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(collapse_whitespace("  a \t\n b   c  "), "a b c");
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }

    #[test]
    fn straightens_curly_quotes() {
        let input = "\u{201C}It\u{2019}s here,\u{201D} she said.";
        assert_eq!(normalize(input), "\"It's here,\" she said.");
    }

    #[test]
    fn collapses_repeated_punctuation() {
        assert_eq!(normalize("Wait..... what?!!"), "Wait... what?!");
        assert_eq!(normalize("Really???"), "Really?");
        assert_eq!(normalize("Two.. dots stay"), "Two.. dots stay");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "",
            "   ",
            "Plain sentence.",
            "Mixed \u{2018}quotes\u{2019} and \u{201C}more\u{201D}!!!   Spaces\t\teverywhere.......",
            "?? !! ... .... ????",
            "Ellipsis.... then!!? then ?!?!",
            "a\u{00A0}b\u{2003}c",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
